//! Test Utilities Crate
//!
//! Shared test infrastructure for the quote adapter test suite.
//!
//! # Modules
//!
//! - `fixtures`: the reference requests, clock, and profiles
//! - `builders`: builders for requests, profiles, and applications
//! - `assertions`: checks for the quote invariants
//! - `generators`: property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
