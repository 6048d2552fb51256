//! Quote providers
//!
//! A [`QuoteProvider`] turns a request into an institution-labelled quote.
//! [`WeightedQuoteService`] is the weighted risk-based implementation: one
//! instance per institution profile, sharing the same pipeline.

use std::fmt;
use std::sync::Arc;

use core_kernel::{validity_date, Clock};
use tracing::{debug, warn};

use crate::amortization::payment_range;
use crate::error::QuoteError;
use crate::pricing::{estimate_fees, RateBand};
use crate::profile::InstitutionProfile;
use crate::request::{Quote, QuoteRequest};
use crate::scoring::RiskAssessment;

/// Produces quotes for one institution
pub trait QuoteProvider: Send + Sync {
    /// Upper-cased institution code stamped on every quote
    fn code(&self) -> &str;

    /// Prices a request
    ///
    /// # Errors
    ///
    /// Returns `QuoteError::InvalidRequest` when the request fails validation
    fn quote(&self, request: &QuoteRequest) -> Result<Quote, QuoteError>;
}

/// Weighted risk-based quoting for a single institution profile
///
/// Pure apart from reading today's date from the clock: the same request on
/// the same day always yields the same quote.
#[derive(Clone)]
pub struct WeightedQuoteService {
    profile: Arc<InstitutionProfile>,
    clock: Arc<dyn Clock>,
}

impl WeightedQuoteService {
    pub fn new(profile: InstitutionProfile, clock: Arc<dyn Clock>) -> Self {
        Self {
            profile: Arc::new(profile),
            clock,
        }
    }

    /// Service for the DAVIVIENDA profile
    pub fn davivienda(clock: Arc<dyn Clock>) -> Self {
        Self::new(InstitutionProfile::davivienda(), clock)
    }

    pub fn profile(&self) -> &InstitutionProfile {
        &self.profile
    }

    /// Runs the scoring and aggregation stages only
    pub fn assess(&self, request: &QuoteRequest) -> RiskAssessment {
        RiskAssessment::evaluate(request, &self.profile)
    }
}

impl fmt::Debug for WeightedQuoteService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeightedQuoteService")
            .field("institution", &self.profile.code())
            .finish_non_exhaustive()
    }
}

impl QuoteProvider for WeightedQuoteService {
    fn code(&self) -> &str {
        self.profile.code()
    }

    fn quote(&self, request: &QuoteRequest) -> Result<Quote, QuoteError> {
        if let Err(error) = request.validate() {
            warn!(institution = self.code(), %error, "Rejected quote request");
            return Err(error);
        }

        let assessment = self.assess(request);
        let band = RateBand::derive(&assessment, &self.profile);
        let (payment_min, payment_max) = payment_range(request.amount, request.term_months, &band);
        let fees = estimate_fees(assessment.risk_index, self.profile.fees());
        let valid_until = validity_date(self.clock.today(), self.profile.validity_days());

        debug!(
            institution = self.code(),
            risk_index = assessment.risk_index,
            rate = band.representative,
            "Quote priced"
        );

        Ok(Quote {
            institution: self.code().to_string(),
            rate_ea_min: band.min,
            rate_ea_max: band.max,
            monthly_payment_min: payment_min,
            monthly_payment_max: payment_max,
            fees_estimated: fees,
            apr_ea_estimated: band.representative,
            valid_until,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::FixedClock;

    fn service() -> WeightedQuoteService {
        let clock = FixedClock::ymd(2025, 12, 1).unwrap();
        WeightedQuoteService::davivienda(Arc::new(clock))
    }

    #[test]
    fn test_quote_is_labelled_and_dated() {
        let quote = service()
            .quote(&QuoteRequest::new(10_000_000, 36, 750, 5_000_000, 1_000_000))
            .unwrap();

        assert_eq!(quote.institution, "DAVIVIENDA");
        assert_eq!(quote.valid_until.to_string(), "2025-12-31");
        assert_eq!(quote.fees_estimated, 32_000);
    }

    #[test]
    fn test_invalid_request_is_rejected() {
        let err = service()
            .quote(&QuoteRequest::new(0, 36, 750, 5_000_000, 1_000_000))
            .unwrap_err();
        assert!(matches!(err, QuoteError::InvalidRequest { .. }));
    }

    #[test]
    fn test_assess_matches_quote_pipeline() {
        let service = service();
        let request = QuoteRequest::new(10_000_000, 36, 750, 5_000_000, 1_000_000);
        assert!((service.assess(&request).risk_index - 0.35).abs() < 1e-9);
    }
}
