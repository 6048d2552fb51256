//! Quote request and quote value objects
//!
//! Both types carry their wire names so an HTTP adapter can (de)serialize them
//! directly: monetary values are whole currency units, rates are effective
//! annual decimals (0.205 = 20.5%), and `validUntil` is an ISO-8601 date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::QuoteError;

/// A consumer-credit quote request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    /// Requested principal
    pub amount: i64,
    /// Loan term in months
    pub term_months: i32,
    /// Credit-bureau score, nominally 300-900
    pub score: i32,
    /// Declared monthly income
    pub monthly_income: i64,
    /// Declared monthly expenses
    pub monthly_expenses: i64,
}

impl QuoteRequest {
    /// Largest accepted principal, 2^53
    ///
    /// Every principal up to this bound is exact as `f64`, and its payment at
    /// any rate in `[0, 1]` fits in `i64`.
    pub const MAX_AMOUNT: i64 = 1 << 53;

    pub fn new(
        amount: i64,
        term_months: i32,
        score: i32,
        monthly_income: i64,
        monthly_expenses: i64,
    ) -> Self {
        Self {
            amount,
            term_months,
            score,
            monthly_income,
            monthly_expenses,
        }
    }

    /// Checks the request preconditions
    ///
    /// Scores outside the nominal range are accepted; normalisation clamps
    /// them. Zero income is accepted and priced as the worst DTI.
    ///
    /// # Errors
    ///
    /// Returns `QuoteError::InvalidRequest` naming the first offending field
    pub fn validate(&self) -> Result<(), QuoteError> {
        if self.amount < 1 {
            return Err(QuoteError::invalid_request("amount", "must be at least 1"));
        }
        if self.amount > Self::MAX_AMOUNT {
            return Err(QuoteError::invalid_request(
                "amount",
                format!("must be at most {}", Self::MAX_AMOUNT),
            ));
        }
        if self.term_months < 1 {
            return Err(QuoteError::invalid_request("termMonths", "must be at least 1"));
        }
        if self.monthly_income < 0 {
            return Err(QuoteError::invalid_request("monthlyIncome", "must not be negative"));
        }
        if self.monthly_expenses < 0 {
            return Err(QuoteError::invalid_request("monthlyExpenses", "must not be negative"));
        }
        Ok(())
    }

    /// Ratio of expenses to income, or `None` when there is no income
    pub fn debt_to_income(&self) -> Option<f64> {
        if self.monthly_income == 0 {
            None
        } else {
            Some(self.monthly_expenses as f64 / self.monthly_income as f64)
        }
    }
}

/// An institution-labelled quote
///
/// Invariants: `rate_ea_min <= apr_ea_estimated <= rate_ea_max`,
/// `monthly_payment_min <= monthly_payment_max`, and rates and fees lie within
/// the issuing profile's anchors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub institution: String,
    #[serde(rename = "rateEAmin")]
    pub rate_ea_min: f64,
    #[serde(rename = "rateEAmax")]
    pub rate_ea_max: f64,
    #[serde(rename = "monthlyPaymentMin")]
    pub monthly_payment_min: i64,
    #[serde(rename = "monthlyPaymentMax")]
    pub monthly_payment_max: i64,
    #[serde(rename = "feesEstimated")]
    pub fees_estimated: i64,
    #[serde(rename = "aprEAEstimated")]
    pub apr_ea_estimated: f64,
    #[serde(rename = "validUntil")]
    pub valid_until: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_nominal_request() {
        let request = QuoteRequest::new(10_000_000, 36, 750, 5_000_000, 1_000_000);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_validate_reports_offending_field() {
        let zero_amount = QuoteRequest::new(0, 36, 750, 5_000_000, 1_000_000);
        assert_eq!(zero_amount.validate().unwrap_err().field(), Some("amount"));

        let zero_term = QuoteRequest::new(1_000, 0, 750, 5_000_000, 1_000_000);
        assert_eq!(zero_term.validate().unwrap_err().field(), Some("termMonths"));

        let negative_income = QuoteRequest::new(1_000, 12, 750, -1, 0);
        assert_eq!(negative_income.validate().unwrap_err().field(), Some("monthlyIncome"));

        let negative_expenses = QuoteRequest::new(1_000, 12, 750, 0, -5);
        assert_eq!(negative_expenses.validate().unwrap_err().field(), Some("monthlyExpenses"));
    }

    #[test]
    fn test_validate_bounds_amount_above() {
        let at_bound = QuoteRequest::new(QuoteRequest::MAX_AMOUNT, 12, 750, 5_000_000, 1_000_000);
        assert!(at_bound.validate().is_ok());

        let over = QuoteRequest::new(QuoteRequest::MAX_AMOUNT + 1, 12, 750, 5_000_000, 1_000_000);
        assert_eq!(over.validate().unwrap_err().field(), Some("amount"));

        let huge = QuoteRequest::new(i64::MAX, 1, 750, 5_000_000, 1_000_000);
        assert_eq!(huge.validate().unwrap_err().field(), Some("amount"));
    }

    #[test]
    fn test_validate_accepts_out_of_range_score_and_zero_income() {
        let request = QuoteRequest::new(1_000, 12, 10, 0, 0);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_debt_to_income() {
        let request = QuoteRequest::new(1_000, 12, 700, 4_000_000, 1_000_000);
        assert_eq!(request.debt_to_income(), Some(0.25));

        let no_income = QuoteRequest::new(1_000, 12, 700, 0, 1_000_000);
        assert_eq!(no_income.debt_to_income(), None);
    }

    #[test]
    fn test_request_uses_camel_case_keys() {
        let json = r#"{"amount":10000000,"termMonths":36,"score":750,"monthlyIncome":5000000,"monthlyExpenses":1000000}"#;
        let request: QuoteRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request, QuoteRequest::new(10_000_000, 36, 750, 5_000_000, 1_000_000));
    }
}
