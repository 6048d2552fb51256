//! Rate band and fee derivation
//!
//! The representative rate is a piecewise-linear map of the risk index through
//! the profile's anchors: R=0 gives the floor, R=0.5 the base rate, and R=1 the
//! ceiling. The band around it is widened by the sensitivity-weighted
//! shortfalls, then clamped to the anchors.

use serde::{Deserialize, Serialize};

use crate::profile::{FeeAnchors, InstitutionProfile, RateAnchors};
use crate::scoring::RiskAssessment;

/// Effective annual rate band of a quote
///
/// Invariant: `floor <= min <= representative <= max <= ceiling`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateBand {
    pub min: f64,
    pub max: f64,
    pub representative: f64,
}

impl RateBand {
    /// Derives the clamped band for an assessment
    pub fn derive(assessment: &RiskAssessment, profile: &InstitutionProfile) -> Self {
        let anchors = profile.rates();
        let raw = representative_rate(assessment.risk_index, anchors);
        let half_width = profile.sensitivities().dot(&assessment.shortfall());

        let lower = anchors.clamp(raw - half_width);
        let upper = anchors.clamp(raw + half_width);

        Self {
            min: lower.min(upper),
            max: lower.max(upper),
            representative: anchors.clamp(raw),
        }
    }
}

/// Maps a risk index onto the rate anchors, before clamping
pub fn representative_rate(risk_index: f64, anchors: &RateAnchors) -> f64 {
    if risk_index >= 0.5 {
        anchors.base + (anchors.ceiling - anchors.base) * (2.0 * risk_index - 1.0)
    } else {
        anchors.base - (anchors.base - anchors.floor) * (1.0 - 2.0 * risk_index)
    }
}

/// Estimates the one-time administrative fee for a risk index
///
/// Same anchoring as the rate: R=0 gives the minimum fee, R=0.5 the base fee,
/// and R=1 the maximum. Rounds half away from zero.
pub fn estimate_fees(risk_index: f64, anchors: &FeeAnchors) -> i64 {
    let base = anchors.base as f64;
    let raw = if risk_index >= 0.5 {
        base + (anchors.max - anchors.base) as f64 * (risk_index - 0.5) * 2.0
    } else {
        base - (anchors.base - anchors.min) as f64 * (1.0 - 2.0 * risk_index)
    };
    (raw.round() as i64).clamp(anchors.min, anchors.max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchors() -> RateAnchors {
        *InstitutionProfile::davivienda().rates()
    }

    #[test]
    fn test_representative_rate_hits_anchors() {
        let a = anchors();
        assert!((representative_rate(0.0, &a) - a.floor).abs() < 1e-12);
        assert!((representative_rate(0.5, &a) - a.base).abs() < 1e-12);
        assert!((representative_rate(1.0, &a) - a.ceiling).abs() < 1e-12);
    }

    #[test]
    fn test_representative_rate_is_monotone() {
        let a = anchors();
        let mut previous = representative_rate(0.0, &a);
        for step in 1..=100 {
            let current = representative_rate(f64::from(step) / 100.0, &a);
            assert!(current >= previous);
            previous = current;
        }
    }

    #[test]
    fn test_fee_anchors() {
        let fees = *InstitutionProfile::davivienda().fees();
        assert_eq!(estimate_fees(0.0, &fees), 25_000);
        assert_eq!(estimate_fees(0.5, &fees), 35_000);
        assert_eq!(estimate_fees(1.0, &fees), 80_000);
        assert_eq!(estimate_fees(0.35, &fees), 32_000);
        assert_eq!(estimate_fees(0.75, &fees), 57_500);
    }

    #[test]
    fn test_band_is_clamped_for_good_profile() {
        let profile = InstitutionProfile::davivienda();
        let request = crate::QuoteRequest::new(10_000_000, 36, 750, 5_000_000, 1_000_000);
        let assessment = RiskAssessment::evaluate(&request, &profile);
        let band = RateBand::derive(&assessment, &profile);

        // raw - h falls below the floor
        assert_eq!(band.min, 0.16);
        assert!(band.max > band.representative);
        assert!((band.representative - 0.1915).abs() < 1e-9);
    }
}
