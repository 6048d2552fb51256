//! Weighted Quoting Domain
//!
//! This crate implements the pricing core of the DAVIVIENDA quote adapter: a
//! pure function from a consumer-credit request to an institution-labelled
//! quote, parameterised by an immutable [`InstitutionProfile`].
//!
//! # Pipeline
//!
//! ```text
//! QuoteRequest
//!    │ validate
//!    ▼
//! SubScores (score, DTI, term, income) ∈ [0,1], 1 = best
//!    │ weights
//!    ▼
//! risk index R ∈ [0,1], 1 = worst
//!    │ rate anchors + sensitivities
//!    ▼
//! RateBand [min, representative, max] clamped to [floor, ceiling]
//!    │ annuity formula            │ fee anchors
//!    ▼                            ▼
//! monthly payment range       administrative fee
//!    └──────────────┬─────────────┘
//!                   ▼
//!        Quote (+ validUntil from the clock)
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use core_kernel::FixedClock;
//! use domain_quote::{QuoteProvider, QuoteRequest, WeightedQuoteService};
//!
//! let clock = Arc::new(FixedClock::ymd(2025, 12, 1)?);
//! let service = WeightedQuoteService::davivienda(clock);
//! let quote = service.quote(&QuoteRequest::new(10_000_000, 36, 750, 5_000_000, 1_000_000))?;
//! assert_eq!(quote.institution, "DAVIVIENDA");
//! ```

pub mod error;
pub mod request;
pub mod profile;
pub mod scoring;
pub mod pricing;
pub mod amortization;
pub mod provider;
pub mod registry;

pub use error::QuoteError;
pub use request::{QuoteRequest, Quote};
pub use profile::{
    InstitutionProfile, ProfileConfig, ScoringBounds, Factors, RateAnchors, FeeAnchors,
    DAVIVIENDA_CODE,
};
pub use scoring::{SubScores, RiskAssessment};
pub use pricing::RateBand;
pub use provider::{QuoteProvider, WeightedQuoteService};
pub use registry::InstitutionRegistry;
