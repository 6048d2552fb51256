//! Sub-score normalisation and risk aggregation
//!
//! Every sub-score lies in [0,1] with 1 meaning best risk. The risk index
//! aggregates the shortfalls `1 - sub_score` with the profile weights, so a
//! weight reads directly as "how much this factor can push the rate up".

use serde::{Deserialize, Serialize};

use crate::profile::{Factors, InstitutionProfile, ScoringBounds};
use crate::request::QuoteRequest;

/// Normalised sub-scores, 1 = best risk
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubScores {
    pub score: f64,
    pub dti: f64,
    pub term: f64,
    pub income: f64,
}

impl SubScores {
    /// Normalises a request against the given bounds
    pub fn from_request(request: &QuoteRequest, bounds: &ScoringBounds) -> Self {
        Self {
            score: score_quality(request.score, bounds),
            dti: dti_quality(request, bounds),
            term: term_quality(request.term_months, bounds),
            income: income_quality(request.monthly_income, bounds),
        }
    }

    /// Per-factor distance from the best score
    pub fn shortfall(&self) -> Factors {
        Factors::new(
            1.0 - self.score,
            1.0 - self.dti,
            1.0 - self.term,
            1.0 - self.income,
        )
    }
}

/// Outcome of the scoring and aggregation stages
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub sub_scores: SubScores,
    /// Weighted risk index in [0,1], higher is worse
    pub risk_index: f64,
}

impl RiskAssessment {
    pub fn evaluate(request: &QuoteRequest, profile: &InstitutionProfile) -> Self {
        let sub_scores = SubScores::from_request(request, profile.bounds());
        let risk_index = clip_unit(profile.weights().dot(&sub_scores.shortfall()));
        Self {
            sub_scores,
            risk_index,
        }
    }

    pub fn shortfall(&self) -> Factors {
        self.sub_scores.shortfall()
    }
}

fn clip_unit(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

fn score_quality(score: i32, bounds: &ScoringBounds) -> f64 {
    let span = bounds.score_ceiling - bounds.score_floor;
    clip_unit((f64::from(score) - bounds.score_floor) / span)
}

fn dti_quality(request: &QuoteRequest, bounds: &ScoringBounds) -> f64 {
    match request.debt_to_income() {
        Some(ratio) => clip_unit(1.0 - ratio / bounds.dti_cap),
        None => 0.0,
    }
}

// Shorter terms score higher.
fn term_quality(term_months: i32, bounds: &ScoringBounds) -> f64 {
    let span = bounds.term_long - bounds.term_short;
    clip_unit(1.0 - (f64::from(term_months) - bounds.term_short) / span)
}

fn income_quality(monthly_income: i64, bounds: &ScoringBounds) -> f64 {
    let span = bounds.income_ceiling - bounds.income_floor;
    clip_unit((monthly_income as f64 - bounds.income_floor) / span)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_sub_scores_for_reference_request() {
        let request = QuoteRequest::new(10_000_000, 36, 750, 5_000_000, 1_000_000);
        let s = SubScores::from_request(&request, &ScoringBounds::default());

        assert!(approx(s.score, 250.0 / 350.0));
        assert!(approx(s.dti, 1.0 - 0.2 / 0.6));
        assert!(approx(s.term, 1.0 - 24.0 / 72.0));
        assert!(approx(s.income, 4.0 / 9.0));
    }

    #[test]
    fn test_sub_scores_are_clipped() {
        let bounds = ScoringBounds::default();
        let best = QuoteRequest::new(1_000, 1, 999, 50_000_000, 0);
        let s = SubScores::from_request(&best, &bounds);
        assert_eq!((s.score, s.dti, s.term, s.income), (1.0, 1.0, 1.0, 1.0));

        let worst = QuoteRequest::new(1_000, 360, 0, 1, 10_000);
        let s = SubScores::from_request(&worst, &bounds);
        assert_eq!((s.score, s.dti, s.term, s.income), (0.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn test_zero_income_is_worst_dti() {
        let request = QuoteRequest::new(1_000, 12, 700, 0, 0);
        let s = SubScores::from_request(&request, &ScoringBounds::default());
        assert_eq!(s.dti, 0.0);
        assert_eq!(s.income, 0.0);
    }

    #[test]
    fn test_risk_index_for_reference_request() {
        let request = QuoteRequest::new(10_000_000, 36, 750, 5_000_000, 1_000_000);
        let assessment = RiskAssessment::evaluate(&request, &InstitutionProfile::davivienda());
        assert!(approx(assessment.risk_index, 0.35));
    }

    #[test]
    fn test_risk_index_extremes() {
        let profile = InstitutionProfile::davivienda();

        let best = QuoteRequest::new(1_000, 12, 900, 20_000_000, 0);
        assert_eq!(RiskAssessment::evaluate(&best, &profile).risk_index, 0.0);

        let worst = QuoteRequest::new(1_000, 120, 300, 0, 1_000);
        assert!(approx(RiskAssessment::evaluate(&worst, &profile).risk_index, 1.0));
    }
}
