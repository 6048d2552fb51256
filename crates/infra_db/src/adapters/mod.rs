//! Domain Adapters
//!
//! Implementations of domain ports over the repositories in this crate.

pub mod application;

pub use application::PostgresApplicationAdapter;
