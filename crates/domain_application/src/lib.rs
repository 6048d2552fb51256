//! Loan Application Tracking Domain
//!
//! Records the loan applications users submit after receiving a quote and
//! tracks their status through review.
//!
//! Persistence is behind [`ApplicationPort`]. The [`InMemoryApplicationPort`]
//! adapter lives here; the PostgreSQL adapter lives in `infra_db`.

pub mod error;
pub mod application;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use application::{Application, ApplicationStatus};
pub use ports::{ApplicationPort, InMemoryApplicationPort};
pub use services::ApplicationService;
