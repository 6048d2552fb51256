//! Infrastructure Database Layer
//!
//! PostgreSQL persistence for loan applications using SQLx. Queries are
//! built at runtime so the crate compiles without a live database; the schema
//! lives in `migrations/` and is embedded with `sqlx::migrate!`.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, run_migrations, DatabaseConfig, PostgresApplicationAdapter};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/davivienda")).await?;
//! run_migrations(&pool).await?;
//! let adapter = PostgresApplicationAdapter::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod repositories;
pub mod adapters;

pub use pool::{DatabasePool, create_pool, run_migrations, DatabaseConfig};
pub use error::DatabaseError;
pub use repositories::ApplicationRepository;
pub use adapters::PostgresApplicationAdapter;
