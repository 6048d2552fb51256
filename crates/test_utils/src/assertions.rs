//! Custom Test Assertions
//!
//! Assertion helpers for quotes that report every offending value in the
//! panic message.

use domain_quote::amortization::monthly_payment;
use domain_quote::{InstitutionProfile, Quote, QuoteRequest};

/// Default tolerance for comparing rates
pub const RATE_TOLERANCE: f64 = 1e-9;

/// Asserts that two rates are equal within `tolerance`
pub fn assert_rate_approx_eq(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "Rates differ by more than tolerance: actual={}, expected={}, tolerance={}",
        actual,
        expected,
        tolerance
    );
}

/// Asserts the ordering and anchor invariants of a quote
///
/// # Panics
///
/// Panics if the rates leave `[floor, ceiling]`, are out of order, the fee
/// leaves its anchors, the payments are out of order, or the institution
/// label does not match the profile.
pub fn assert_quote_invariants(quote: &Quote, profile: &InstitutionProfile) {
    let rates = profile.rates();
    assert!(
        rates.floor <= quote.rate_ea_min
            && quote.rate_ea_min <= quote.apr_ea_estimated
            && quote.apr_ea_estimated <= quote.rate_ea_max
            && quote.rate_ea_max <= rates.ceiling,
        "Rates out of order: floor={}, min={}, apr={}, max={}, ceiling={}",
        rates.floor,
        quote.rate_ea_min,
        quote.apr_ea_estimated,
        quote.rate_ea_max,
        rates.ceiling
    );

    let fees = profile.fees();
    assert!(
        (fees.min..=fees.max).contains(&quote.fees_estimated),
        "Fee {} outside [{}, {}]",
        quote.fees_estimated,
        fees.min,
        fees.max
    );

    assert!(
        quote.monthly_payment_min <= quote.monthly_payment_max,
        "Payments out of order: min={}, max={}",
        quote.monthly_payment_min,
        quote.monthly_payment_max
    );

    assert_eq!(
        quote.institution,
        profile.code(),
        "Quote labelled with the wrong institution"
    );
}

/// Asserts that the payment range matches the annuity formula at the band
/// edges, within one peso of rounding
pub fn assert_payments_consistent(quote: &Quote, request: &QuoteRequest) {
    let principal = request.amount as f64;
    let at_min = monthly_payment(principal, request.term_months, quote.rate_ea_min);
    let at_max = monthly_payment(principal, request.term_months, quote.rate_ea_max);

    assert!(
        (quote.monthly_payment_min as f64 - at_min).abs() <= 1.0,
        "Minimum payment {} does not match {} at rate {}",
        quote.monthly_payment_min,
        at_min,
        quote.rate_ea_min
    );
    assert!(
        (quote.monthly_payment_max as f64 - at_max).abs() <= 1.0,
        "Maximum payment {} does not match {} at rate {}",
        quote.monthly_payment_max,
        at_max,
        quote.rate_ea_max
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{QuoteFixtures, RequestFixtures};
    use domain_quote::QuoteProvider;

    #[test]
    fn test_good_profile_passes() {
        let service = QuoteFixtures::davivienda();
        let request = RequestFixtures::good_profile();
        let quote = service.quote(&request).unwrap();

        assert_quote_invariants(&quote, service.profile());
        assert_payments_consistent(&quote, &request);
    }

    #[test]
    #[should_panic(expected = "Rates out of order")]
    fn test_inverted_band_is_caught() {
        let service = QuoteFixtures::davivienda();
        let mut quote = service.quote(&RequestFixtures::good_profile()).unwrap();
        std::mem::swap(&mut quote.rate_ea_min, &mut quote.rate_ea_max);
        assert_quote_invariants(&quote, service.profile());
    }

    #[test]
    #[should_panic(expected = "Fee")]
    fn test_fee_outside_anchors_is_caught() {
        let service = QuoteFixtures::davivienda();
        let mut quote = service.quote(&RequestFixtures::good_profile()).unwrap();
        quote.fees_estimated = 1;
        assert_quote_invariants(&quote, service.profile());
    }

    #[test]
    fn test_rate_approx_eq() {
        assert_rate_approx_eq(0.1915, 0.1915 + 1e-12, RATE_TOLERANCE);
    }
}
