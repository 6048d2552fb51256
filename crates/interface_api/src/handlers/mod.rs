//! Request handlers

pub mod health;
pub mod quotes;
pub mod applications;
