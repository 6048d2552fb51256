//! Property-Based Test Generators
//!
//! Proptest strategies for quote requests and application data.

use domain_application::ApplicationStatus;
use domain_quote::QuoteRequest;
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for loan amounts in COP
pub fn amount_strategy() -> impl Strategy<Value = i64> {
    1i64..=200_000_000
}

/// Strategy for terms, up to 30 years
pub fn term_strategy() -> impl Strategy<Value = i32> {
    1i32..=360
}

/// Strategy for bureau scores, including values outside the scoring bounds
pub fn score_strategy() -> impl Strategy<Value = i32> {
    0i32..=1_000
}

/// Strategy for monthly income or expenses, zero included
pub fn cash_flow_strategy() -> impl Strategy<Value = i64> {
    0i64..=100_000_000
}

prop_compose! {
    /// Requests that pass validation
    pub fn valid_request_strategy()(
        amount in amount_strategy(),
        term_months in term_strategy(),
        score in score_strategy(),
        monthly_income in cash_flow_strategy(),
        monthly_expenses in cash_flow_strategy(),
    ) -> QuoteRequest {
        QuoteRequest::new(amount, term_months, score, monthly_income, monthly_expenses)
    }
}

/// Requests that fail validation on exactly one field
pub fn invalid_request_strategy() -> impl Strategy<Value = (QuoteRequest, &'static str)> {
    prop_oneof![
        (valid_request_strategy(), i64::MIN..=0)
            .prop_map(|(request, amount)| (QuoteRequest { amount, ..request }, "amount")),
        (valid_request_strategy(), (QuoteRequest::MAX_AMOUNT + 1)..=i64::MAX)
            .prop_map(|(request, amount)| (QuoteRequest { amount, ..request }, "amount")),
        (valid_request_strategy(), i32::MIN..=0).prop_map(|(request, term_months)| {
            (QuoteRequest { term_months, ..request }, "termMonths")
        }),
        (valid_request_strategy(), i64::MIN..0).prop_map(|(request, monthly_income)| {
            (QuoteRequest { monthly_income, ..request }, "monthlyIncome")
        }),
        (valid_request_strategy(), i64::MIN..0).prop_map(|(request, monthly_expenses)| {
            (QuoteRequest { monthly_expenses, ..request }, "monthlyExpenses")
        }),
    ]
}

/// Strategy for application statuses
pub fn status_strategy() -> impl Strategy<Value = ApplicationStatus> {
    proptest::sample::select(ApplicationStatus::ALL.to_vec())
}

/// Strategy for positive application amounts with two decimal places
pub fn application_amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..=50_000_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for user ids
pub fn user_id_strategy() -> impl Strategy<Value = String> {
    "user[0-9]{1,6}"
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn generated_requests_validate(request in valid_request_strategy()) {
            prop_assert!(request.validate().is_ok());
        }

        #[test]
        fn invalid_requests_name_their_field((request, field) in invalid_request_strategy()) {
            let err = request.validate().unwrap_err();
            prop_assert_eq!(err.field(), Some(field));
        }

        #[test]
        fn generated_amounts_are_positive(amount in application_amount_strategy()) {
            prop_assert!(amount > Decimal::ZERO);
        }
    }
}
