//! Riegel race-time prediction
//!
//! Projects a performance at one distance onto another with Riegel's
//! power law: `T2 = T1 × (D2 / D1)^1.06`.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::conversion::{format_race_time, RACE_TIME_PLACEHOLDER};
use crate::distances::RaceDistance;

/// Fatigue exponent of the Riegel formula
pub const RIEGEL_EXPONENT: f64 = 1.06;

/// Predict the time for `target_km` from a time over `base_km`.
///
/// Returns `None` when the base time or base distance is not positive, when
/// the distance ratio leaves the `Decimal` range, or when the projection is
/// not a finite number (e.g. a negative target).
/// The result is rounded to the nearest second.
pub fn predict(base_time_seconds: i64, base_km: Decimal, target_km: Decimal) -> Option<i64> {
    if base_time_seconds <= 0 || base_km <= Decimal::ZERO {
        return None;
    }

    let Some(ratio) = target_km.checked_div(base_km).and_then(|r| r.to_f64()) else {
        tracing::trace!(%base_km, %target_km, "Riegel distance ratio out of range");
        return None;
    };
    let predicted = base_time_seconds as f64 * ratio.powf(RIEGEL_EXPONENT);

    if !predicted.is_finite() {
        tracing::trace!(%base_km, %target_km, "Riegel projection is not finite");
        return None;
    }

    Some(predicted.round() as i64)
}

/// A projected finish time for one registry distance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RacePrediction {
    pub label: String,
    pub km: Decimal,
    /// Predicted time in seconds, `None` when no projection is possible
    pub seconds: Option<i64>,
}

impl RacePrediction {
    /// `H:MM:SS` / `M:SS`, or a placeholder
    pub fn formatted(&self) -> String {
        self.seconds
            .map(format_race_time)
            .unwrap_or_else(|| RACE_TIME_PLACEHOLDER.to_string())
    }
}

/// Predict every target distance except the base distance itself
pub fn predict_all(
    base_time_seconds: i64,
    base: &RaceDistance,
    targets: &[RaceDistance],
) -> Vec<RacePrediction> {
    targets
        .iter()
        .filter(|target| target.label != base.label)
        .map(|target| RacePrediction {
            label: target.label.to_string(),
            km: target.km,
            seconds: predict(base_time_seconds, base.km, target.km),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distances::{distance_by_label, race_distances};
    use rust_decimal_macros::dec;

    #[test]
    fn test_five_k_to_ten_k() {
        // 25:00 5K -> 1500 × 2^1.06 ≈ 3127.4s
        let predicted = predict(1500, dec!(5), dec!(10)).unwrap();
        assert_eq!(predicted, 3127);
        assert_eq!(format_race_time(predicted), "52:07");
    }

    #[test]
    fn test_same_distance_is_identity() {
        assert_eq!(predict(1500, dec!(5), dec!(5)), Some(1500));
        assert_eq!(predict(12600, dec!(42.195), dec!(42.195)), Some(12600));
    }

    #[test]
    fn test_shorter_target_is_faster() {
        let half = predict(7200, dec!(21.0975), dec!(10)).unwrap();
        assert!(half < 7200);
        assert!(half > 3000);
    }

    #[test]
    fn test_guards_return_none() {
        assert_eq!(predict(0, dec!(5), dec!(10)), None);
        assert_eq!(predict(-60, dec!(5), dec!(10)), None);
        assert_eq!(predict(1500, dec!(0), dec!(10)), None);
        assert_eq!(predict(1500, dec!(-5), dec!(10)), None);
        assert_eq!(predict(1500, dec!(5), dec!(-10)), None);
    }

    #[test]
    fn test_ratio_overflow_returns_none() {
        assert_eq!(predict(1500, Decimal::new(1, 28), dec!(42.195)), None);
        assert_eq!(predict(1500, dec!(0.5), Decimal::MAX), None);
        // Huge but representable ratios saturate instead of failing
        assert_eq!(predict(i64::MAX, dec!(5), dec!(42.195)), Some(i64::MAX));
    }

    #[test]
    fn test_zero_target_is_zero() {
        assert_eq!(predict(1500, dec!(5), dec!(0)), Some(0));
    }

    #[test]
    fn test_predict_all_skips_base() {
        let base = distance_by_label("5K").unwrap();
        let predictions = predict_all(1500, base, race_distances());

        assert_eq!(predictions.len(), race_distances().len() - 1);
        assert!(predictions.iter().all(|p| p.label != "5K"));

        let times: Vec<i64> = predictions.iter().map(|p| p.seconds.unwrap()).collect();
        assert!(times.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_predict_all_zero_time_gives_placeholders() {
        let base = distance_by_label("10K").unwrap();
        let predictions = predict_all(0, base, race_distances());
        assert!(predictions.iter().all(|p| p.seconds.is_none()));
        assert!(predictions.iter().all(|p| p.formatted() == RACE_TIME_PLACEHOLDER));
    }
}
