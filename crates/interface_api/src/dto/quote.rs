//! Quote DTOs
//!
//! The quote request and response bodies are the domain's own
//! `QuoteRequest` and `Quote`, which carry their wire names.

use serde::Serialize;

pub use domain_quote::{Quote, QuoteRequest};

/// Registered institutions
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstitutionsResponse {
    /// Codes in ascending order
    pub institutions: Vec<String>,
    /// Institution used by `POST /api/quotes`
    pub default_institution: Option<String>,
}
