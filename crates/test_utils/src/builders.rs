//! Test Data Builders
//!
//! Builders start from the reference fixtures so a test only states the
//! fields it cares about.

use chrono::{DateTime, Utc};
use core_kernel::ApplicationId;
use domain_application::{Application, ApplicationStatus};
use domain_quote::{InstitutionProfile, ProfileConfig, QuoteError, QuoteRequest};
use rust_decimal::Decimal;

use crate::fixtures::{ApplicationFixtures, RequestFixtures};

/// Builder for quote requests, seeded with the good profile
#[derive(Debug, Clone)]
pub struct QuoteRequestBuilder {
    request: QuoteRequest,
}

impl Default for QuoteRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl QuoteRequestBuilder {
    pub fn new() -> Self {
        Self {
            request: RequestFixtures::good_profile(),
        }
    }

    pub fn amount(mut self, amount: i64) -> Self {
        self.request.amount = amount;
        self
    }

    pub fn term_months(mut self, term_months: i32) -> Self {
        self.request.term_months = term_months;
        self
    }

    pub fn score(mut self, score: i32) -> Self {
        self.request.score = score;
        self
    }

    pub fn monthly_income(mut self, monthly_income: i64) -> Self {
        self.request.monthly_income = monthly_income;
        self
    }

    pub fn monthly_expenses(mut self, monthly_expenses: i64) -> Self {
        self.request.monthly_expenses = monthly_expenses;
        self
    }

    pub fn build(self) -> QuoteRequest {
        self.request
    }
}

/// Builder for institution profiles, seeded with the DAVIVIENDA defaults
#[derive(Debug, Clone)]
pub struct ProfileBuilder {
    config: ProfileConfig,
}

impl Default for ProfileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileBuilder {
    pub fn new() -> Self {
        Self {
            config: ProfileConfig::default(),
        }
    }

    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.config.institution_code = code.into();
        self
    }

    /// Weights in score, DTI, term, income order
    pub fn weights(mut self, score: f64, dti: f64, term: f64, income: f64) -> Self {
        self.config.w_score = score;
        self.config.w_dti = dti;
        self.config.w_term = term;
        self.config.w_income = income;
        self
    }

    /// Sensitivities in score, DTI, term, income order
    pub fn sensitivities(mut self, score: f64, dti: f64, term: f64, income: f64) -> Self {
        self.config.k_score = score;
        self.config.k_dti = dti;
        self.config.k_term = term;
        self.config.k_income = income;
        self
    }

    pub fn rates(mut self, base: f64, floor: f64, ceiling: f64) -> Self {
        self.config.base_ea = base;
        self.config.floor_ea = floor;
        self.config.ceiling_ea = ceiling;
        self
    }

    pub fn fees(mut self, base: i64, min: i64, max: i64) -> Self {
        self.config.base_fees = base;
        self.config.min_fees = min;
        self.config.max_fees = max;
        self
    }

    pub fn validity_days(mut self, days: u32) -> Self {
        self.config.validity_days = days;
        self
    }

    /// Raw description, for tests that exercise profile validation
    pub fn config(self) -> ProfileConfig {
        self.config
    }

    /// Validates and builds the profile
    pub fn build(self) -> Result<InstitutionProfile, QuoteError> {
        InstitutionProfile::try_from(self.config)
    }
}

/// Builder for loan applications
#[derive(Debug, Clone)]
pub struct ApplicationBuilder {
    id: ApplicationId,
    user_id: String,
    amount: Decimal,
    status: ApplicationStatus,
    notes: Option<String>,
    submitted_at: Option<DateTime<Utc>>,
}

impl Default for ApplicationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicationBuilder {
    pub fn new() -> Self {
        Self {
            id: ApplicationId::new(),
            user_id: ApplicationFixtures::user_id().to_string(),
            amount: ApplicationFixtures::amount(),
            status: ApplicationStatus::Pending,
            notes: None,
            submitted_at: None,
        }
    }

    pub fn id(mut self, id: ApplicationId) -> Self {
        self.id = id;
        self
    }

    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    pub fn amount(mut self, amount: Decimal) -> Self {
        self.amount = amount;
        self
    }

    pub fn status(mut self, status: ApplicationStatus) -> Self {
        self.status = status;
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Pins the submission, creation and update timestamps
    pub fn submitted_at(mut self, at: DateTime<Utc>) -> Self {
        self.submitted_at = Some(at);
        self
    }

    pub fn build(self) -> Application {
        let mut application = Application::submit(self.user_id, self.amount);
        application.id = self.id;
        application.status = self.status;
        application.notes = self.notes;
        if let Some(at) = self.submitted_at {
            application.application_date = at;
            application.created_at = at;
            application.updated_at = at;
        }
        application
    }
}
