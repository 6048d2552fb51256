//! Amortising annuity payments
//!
//! Rates are effective annual; payments are monthly. Internal arithmetic is
//! floating point and results are rounded to whole currency units at the
//! boundary (half away from zero).

use crate::pricing::RateBand;

/// Converts an effective annual rate to the equivalent monthly rate
pub fn monthly_rate(effective_annual: f64) -> f64 {
    (1.0 + effective_annual).powf(1.0 / 12.0) - 1.0
}

/// Level monthly payment for `principal` over `months` at an effective annual rate
///
/// `months` must be at least 1.
pub fn monthly_payment(principal: f64, months: i32, effective_annual: f64) -> f64 {
    let n = f64::from(months.max(1));
    let rate = monthly_rate(effective_annual);
    if rate <= 0.0 {
        return principal / n;
    }
    principal * rate / (1.0 - (1.0 + rate).powf(-n))
}

/// Rounds a currency amount to whole units
pub fn round_currency(amount: f64) -> i64 {
    amount.round() as i64
}

/// Monthly payment range over a rate band, as `(min, max)`
pub fn payment_range(principal: i64, months: i32, band: &RateBand) -> (i64, i64) {
    let principal = principal as f64;
    let at_min = round_currency(monthly_payment(principal, months, band.min));
    let at_max = round_currency(monthly_payment(principal, months, band.max));
    (at_min.min(at_max), at_min.max(at_max))
}
