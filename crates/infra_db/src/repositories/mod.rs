//! Repository implementations
//!
//! Repositories own the SQL and the row types; adapters translate rows to
//! domain values. Queries are built at runtime with `sqlx::query_as`.

pub mod application;

pub use application::{ApplicationRepository, ApplicationRow};
