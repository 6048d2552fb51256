//! Institution profiles
//!
//! A profile is the immutable bundle of constants that tunes the weighted
//! algorithm for one institution: aggregation weights, band sensitivities,
//! rate and fee anchors, the normalisation bounds, and the validity window.
//!
//! Profiles are described by a [`ProfileConfig`] (what configuration files and
//! environment variables deserialize into) and validated once, when converted
//! into an [`InstitutionProfile`]. Quoting never re-validates.

use serde::{Deserialize, Serialize};

use crate::error::QuoteError;

/// Institution code of the adapter's own bank
pub const DAVIVIENDA_CODE: &str = "DAVIVIENDA";

/// Tolerance on the sum of the aggregation weights
const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// One value per pricing factor
///
/// Used for aggregation weights, band sensitivities, and sub-score shortfalls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Factors {
    pub score: f64,
    pub dti: f64,
    pub term: f64,
    pub income: f64,
}

impl Factors {
    pub fn new(score: f64, dti: f64, term: f64, income: f64) -> Self {
        Self { score, dti, term, income }
    }

    pub fn sum(&self) -> f64 {
        self.score + self.dti + self.term + self.income
    }

    /// Factor-wise product, summed
    pub fn dot(&self, other: &Factors) -> f64 {
        self.score * other.score
            + self.dti * other.dti
            + self.term * other.term
            + self.income * other.income
    }

    fn named(&self) -> [(&'static str, f64); 4] {
        [
            ("score", self.score),
            ("dti", self.dti),
            ("term", self.term),
            ("income", self.income),
        ]
    }
}

/// Effective annual rate anchors
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateAnchors {
    pub base: f64,
    pub floor: f64,
    pub ceiling: f64,
}

impl RateAnchors {
    /// Constrains a rate to `[floor, ceiling]`
    pub fn clamp(&self, rate: f64) -> f64 {
        rate.clamp(self.floor, self.ceiling)
    }
}

/// Administrative fee anchors in whole currency units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeAnchors {
    pub base: i64,
    pub min: i64,
    pub max: i64,
}

/// Raw-input bounds used by sub-score normalisation
///
/// Each sub-score maps linearly between its bounds and is clipped to [0,1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringBounds {
    /// Credit score mapped to 0
    pub score_floor: f64,
    /// Credit score mapped to 1
    pub score_ceiling: f64,
    /// Debt-to-income ratio at which the DTI sub-score reaches 0
    pub dti_cap: f64,
    /// Term (months) at or below which the term sub-score is 1
    pub term_short: f64,
    /// Term (months) at or above which the term sub-score is 0
    pub term_long: f64,
    /// Monthly income mapped to 0
    pub income_floor: f64,
    /// Monthly income mapped to 1
    pub income_ceiling: f64,
}

impl Default for ScoringBounds {
    fn default() -> Self {
        Self {
            score_floor: 500.0,
            score_ceiling: 850.0,
            dti_cap: 0.6,
            term_short: 12.0,
            term_long: 84.0,
            income_floor: 1_000_000.0,
            income_ceiling: 10_000_000.0,
        }
    }
}

impl ScoringBounds {
    fn validate(&self) -> Result<(), QuoteError> {
        let values = [
            ("bounds.score_floor", self.score_floor),
            ("bounds.score_ceiling", self.score_ceiling),
            ("bounds.dti_cap", self.dti_cap),
            ("bounds.term_short", self.term_short),
            ("bounds.term_long", self.term_long),
            ("bounds.income_floor", self.income_floor),
            ("bounds.income_ceiling", self.income_ceiling),
        ];
        for (field, value) in values {
            if !value.is_finite() {
                return Err(QuoteError::invalid_profile(field, "must be finite"));
            }
        }
        if self.score_floor >= self.score_ceiling {
            return Err(QuoteError::invalid_profile(
                "bounds.score_floor",
                "must be below bounds.score_ceiling",
            ));
        }
        if self.dti_cap <= 0.0 {
            return Err(QuoteError::invalid_profile("bounds.dti_cap", "must be positive"));
        }
        if self.term_short >= self.term_long {
            return Err(QuoteError::invalid_profile(
                "bounds.term_short",
                "must be below bounds.term_long",
            ));
        }
        if self.income_floor >= self.income_ceiling {
            return Err(QuoteError::invalid_profile(
                "bounds.income_floor",
                "must be below bounds.income_ceiling",
            ));
        }
        Ok(())
    }
}

/// Deserializable description of an institution profile
///
/// Missing keys fall back to the DAVIVIENDA values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    pub institution_code: String,
    pub w_score: f64,
    pub w_dti: f64,
    pub w_term: f64,
    pub w_income: f64,
    pub k_score: f64,
    pub k_dti: f64,
    pub k_term: f64,
    pub k_income: f64,
    pub base_ea: f64,
    pub floor_ea: f64,
    pub ceiling_ea: f64,
    pub base_fees: i64,
    pub min_fees: i64,
    pub max_fees: i64,
    pub validity_days: u32,
    pub bounds: ScoringBounds,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            institution_code: DAVIVIENDA_CODE.to_string(),
            w_score: 0.35,
            w_dti: 0.40,
            w_term: 0.10,
            w_income: 0.15,
            // DTI-sensitive institution
            k_score: 0.09,
            k_dti: 0.07,
            k_term: 0.02,
            k_income: 0.03,
            base_ea: 0.205,
            floor_ea: 0.16,
            ceiling_ea: 0.34,
            base_fees: 35_000,
            min_fees: 25_000,
            max_fees: 80_000,
            validity_days: 30,
            bounds: ScoringBounds::default(),
        }
    }
}

/// Validated, immutable institution profile
#[derive(Debug, Clone, PartialEq)]
pub struct InstitutionProfile {
    code: String,
    weights: Factors,
    sensitivities: Factors,
    rates: RateAnchors,
    fees: FeeAnchors,
    validity_days: u32,
    bounds: ScoringBounds,
}

impl InstitutionProfile {
    /// The DAVIVIENDA profile
    pub fn davivienda() -> Self {
        let config = ProfileConfig::default();
        Self {
            code: DAVIVIENDA_CODE.to_string(),
            weights: Factors::new(config.w_score, config.w_dti, config.w_term, config.w_income),
            sensitivities: Factors::new(config.k_score, config.k_dti, config.k_term, config.k_income),
            rates: RateAnchors {
                base: config.base_ea,
                floor: config.floor_ea,
                ceiling: config.ceiling_ea,
            },
            fees: FeeAnchors {
                base: config.base_fees,
                min: config.min_fees,
                max: config.max_fees,
            },
            validity_days: config.validity_days,
            bounds: config.bounds,
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn weights(&self) -> &Factors {
        &self.weights
    }

    pub fn sensitivities(&self) -> &Factors {
        &self.sensitivities
    }

    pub fn rates(&self) -> &RateAnchors {
        &self.rates
    }

    pub fn fees(&self) -> &FeeAnchors {
        &self.fees
    }

    pub fn validity_days(&self) -> u32 {
        self.validity_days
    }

    pub fn bounds(&self) -> &ScoringBounds {
        &self.bounds
    }
}

impl TryFrom<ProfileConfig> for InstitutionProfile {
    type Error = QuoteError;

    /// Validates a profile description
    ///
    /// # Errors
    ///
    /// Returns `QuoteError::InvalidProfile` naming the first offending key
    fn try_from(config: ProfileConfig) -> Result<Self, Self::Error> {
        let code = config.institution_code.trim().to_ascii_uppercase();
        if code.is_empty() {
            return Err(QuoteError::invalid_profile("institution_code", "must not be empty"));
        }

        let weights = Factors::new(config.w_score, config.w_dti, config.w_term, config.w_income);
        for (name, value) in weights.named() {
            if !value.is_finite() || value < 0.0 {
                return Err(QuoteError::invalid_profile(
                    format!("w_{name}"),
                    "must be a finite non-negative number",
                ));
            }
        }
        let total = weights.sum();
        if (total - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(QuoteError::invalid_profile(
                "weights",
                format!("must sum to 1, got {total}"),
            ));
        }

        let sensitivities =
            Factors::new(config.k_score, config.k_dti, config.k_term, config.k_income);
        for (name, value) in sensitivities.named() {
            if !value.is_finite() || value < 0.0 {
                return Err(QuoteError::invalid_profile(
                    format!("k_{name}"),
                    "must be a finite non-negative number",
                ));
            }
        }

        let rates = RateAnchors {
            base: config.base_ea,
            floor: config.floor_ea,
            ceiling: config.ceiling_ea,
        };
        for (field, value) in [
            ("base_ea", rates.base),
            ("floor_ea", rates.floor),
            ("ceiling_ea", rates.ceiling),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(QuoteError::invalid_profile(field, "must be within [0, 1]"));
            }
        }
        if rates.floor > rates.base {
            return Err(QuoteError::invalid_profile("floor_ea", "must not exceed base_ea"));
        }
        if rates.base > rates.ceiling {
            return Err(QuoteError::invalid_profile("base_ea", "must not exceed ceiling_ea"));
        }

        let fees = FeeAnchors {
            base: config.base_fees,
            min: config.min_fees,
            max: config.max_fees,
        };
        if fees.min < 0 {
            return Err(QuoteError::invalid_profile("min_fees", "must not be negative"));
        }
        if fees.min > fees.base {
            return Err(QuoteError::invalid_profile("min_fees", "must not exceed base_fees"));
        }
        if fees.base > fees.max {
            return Err(QuoteError::invalid_profile("base_fees", "must not exceed max_fees"));
        }

        config.bounds.validate()?;

        Ok(Self {
            code,
            weights,
            sensitivities,
            rates,
            fees,
            validity_days: config.validity_days,
            bounds: config.bounds,
        })
    }
}
