//! Pre-built Test Fixtures
//!
//! Ready-to-use requests, clocks, and services for the quote and application
//! test suites. Every fixture is deterministic.

use std::sync::Arc;

use chrono::NaiveDate;
use core_kernel::{Clock, FixedClock};
use domain_application::{Application, ApplicationStatus};
use domain_quote::{InstitutionRegistry, QuoteRequest, WeightedQuoteService};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Fixture for the reference clock
pub struct ClockFixtures;

impl ClockFixtures {
    /// Quoting date used throughout the suites (Dec 1, 2025)
    pub fn quote_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 1).expect("valid date")
    }

    /// `validUntil` of a 30-day DAVIVIENDA quote issued on `quote_date`
    pub fn valid_until() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 31).expect("valid date")
    }

    /// Clock frozen at `quote_date`
    pub fn fixed() -> Arc<dyn Clock> {
        Arc::new(FixedClock::new(Self::quote_date()))
    }
}

/// Fixture for quote requests
///
/// Each request matches one of the reference pricing scenarios.
pub struct RequestFixtures;

impl RequestFixtures {
    /// 10M COP over 36 months, score 750, income 5M, expenses 1M
    pub fn good_profile() -> QuoteRequest {
        QuoteRequest::new(10_000_000, 36, 750, 5_000_000, 1_000_000)
    }

    /// Good profile with a 600 score
    pub fn low_score() -> QuoteRequest {
        QuoteRequest::new(10_000_000, 36, 600, 5_000_000, 1_000_000)
    }

    /// Good profile with an 850 score
    pub fn high_score() -> QuoteRequest {
        QuoteRequest::new(10_000_000, 36, 850, 5_000_000, 1_000_000)
    }

    /// Good profile with expenses at 60% of income
    pub fn high_dti() -> QuoteRequest {
        QuoteRequest::new(10_000_000, 36, 750, 5_000_000, 3_000_000)
    }

    /// 5M over 12 months
    pub fn short_term() -> QuoteRequest {
        QuoteRequest::new(5_000_000, 12, 750, 5_000_000, 1_000_000)
    }

    /// Worst case on every factor; risk index 1
    pub fn worst_case() -> QuoteRequest {
        QuoteRequest::new(10_000_000, 120, 300, 0, 0)
    }

    /// Best case on every factor; risk index 0
    pub fn best_case() -> QuoteRequest {
        QuoteRequest::new(10_000_000, 6, 900, 20_000_000, 0)
    }

    /// Request body of the good profile, as a client would send it
    pub fn good_profile_json() -> &'static str {
        r#"{"amount":10000000,"termMonths":36,"score":750,"monthlyIncome":5000000,"monthlyExpenses":1000000}"#
    }
}

/// Fixture for quoting services
pub struct QuoteFixtures;

impl QuoteFixtures {
    /// DAVIVIENDA service on the reference clock
    pub fn davivienda() -> WeightedQuoteService {
        WeightedQuoteService::davivienda(ClockFixtures::fixed())
    }

    /// Registry holding only DAVIVIENDA, on the reference clock
    pub fn registry() -> InstitutionRegistry {
        InstitutionRegistry::davivienda(ClockFixtures::fixed())
    }
}

/// Fixture for loan applications
pub struct ApplicationFixtures;

impl ApplicationFixtures {
    pub fn user_id() -> &'static str {
        "user123"
    }

    pub fn amount() -> Decimal {
        dec!(5000000.00)
    }

    /// Freshly submitted application
    pub fn pending() -> Application {
        Application::submit(Self::user_id(), Self::amount())
    }

    /// Application already approved with a reviewer note
    pub fn approved() -> Application {
        let mut application = Self::pending();
        application.update_status(ApplicationStatus::Approved, Some("Meets policy".to_string()));
        application
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_quote::QuoteProvider;

    #[test]
    fn test_fixture_requests_are_valid() {
        for request in [
            RequestFixtures::good_profile(),
            RequestFixtures::low_score(),
            RequestFixtures::high_score(),
            RequestFixtures::high_dti(),
            RequestFixtures::short_term(),
            RequestFixtures::worst_case(),
            RequestFixtures::best_case(),
        ] {
            assert!(request.validate().is_ok(), "{request:?}");
        }
    }

    #[test]
    fn test_good_profile_json_matches_request() {
        let parsed: QuoteRequest =
            serde_json::from_str(RequestFixtures::good_profile_json()).unwrap();
        assert_eq!(parsed, RequestFixtures::good_profile());
    }

    #[test]
    fn test_reference_clock() {
        assert_eq!(ClockFixtures::fixed().today(), ClockFixtures::quote_date());
        let quote = QuoteFixtures::davivienda()
            .quote(&RequestFixtures::good_profile())
            .unwrap();
        assert_eq!(quote.valid_until, ClockFixtures::valid_until());
    }

    #[test]
    fn test_approved_fixture() {
        let application = ApplicationFixtures::approved();
        assert_eq!(application.status, ApplicationStatus::Approved);
        assert_eq!(application.notes.as_deref(), Some("Meets policy"));
    }
}
