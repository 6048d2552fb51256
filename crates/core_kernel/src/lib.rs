//! Core Kernel - Foundational types shared by the quote adapter crates
//!
//! This crate provides the building blocks used across the domain modules:
//! - The clock contract used to stamp quote validity dates
//! - Strongly-typed identifiers for tracked entities
//! - Port and health-check abstractions for swappable adapters

pub mod temporal;
pub mod identifiers;
pub mod ports;

pub use temporal::{Clock, SystemClock, FixedClock, Timezone, TemporalError, validity_date};
pub use identifiers::ApplicationId;
pub use ports::{
    PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth,
};
