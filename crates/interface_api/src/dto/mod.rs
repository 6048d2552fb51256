//! Request/response data transfer objects

pub mod quote;
pub mod application;
