//! VDOT fitness scoring and race-time prediction
//!
//! VDOT is Jack Daniels' composite aerobic-fitness score. This module works
//! from a small reference table of equivalent race times at evenly spaced
//! scores instead of the full physiological model:
//!
//! - **Reverse lookup** ([`VdotTable::calculate_vdot`]) snaps a performance to
//!   the reference point with the closest time at the same distance, and
//!   extrapolates below the table for performances slower than it covers.
//! - **Forward prediction** ([`VdotTable::predict_time`]) linearly
//!   interpolates between the two bracketing reference points, and
//!   extrapolates linearly past either end of the table.
//!
//! The 15K has no column of its own. Its reference time is synthesized from
//! the 10K and half-marathon times with a fixed blend factor.
//!
//! Nothing here indexes the table by position: lookups iterate and bracket
//! over whatever points the table holds, so finer or wider tables work
//! unchanged as long as they satisfy the ordering checked by
//! [`VdotTable::new`].

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;

use crate::conversion::{format_race_time, round_seconds};
use crate::error::{CalculationError, Result};

/// Distance categories with VDOT reference times
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum VdotDistance {
    FiveK,
    TenK,
    FifteenK,
    HalfMarathon,
    Marathon,
}

impl VdotDistance {
    pub const ALL: [VdotDistance; 5] = [
        VdotDistance::FiveK,
        VdotDistance::TenK,
        VdotDistance::FifteenK,
        VdotDistance::HalfMarathon,
        VdotDistance::Marathon,
    ];

    /// Category of a distance in kilometres.
    ///
    /// 5, 10 and 15 must match exactly; 21–21.2 is a half marathon and
    /// 42–42.3 a marathon. Everything else has no category.
    pub fn from_km(km: Decimal) -> Option<Self> {
        if km == dec!(5) {
            Some(VdotDistance::FiveK)
        } else if km == dec!(10) {
            Some(VdotDistance::TenK)
        } else if km == dec!(15) {
            Some(VdotDistance::FifteenK)
        } else if km >= dec!(21) && km <= dec!(21.2) {
            Some(VdotDistance::HalfMarathon)
        } else if km >= dec!(42) && km <= dec!(42.3) {
            Some(VdotDistance::Marathon)
        } else {
            None
        }
    }

    /// Category for a registry label
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.label() == label)
    }

    pub fn label(&self) -> &'static str {
        match self {
            VdotDistance::FiveK => "5K",
            VdotDistance::TenK => "10K",
            VdotDistance::FifteenK => "15K",
            VdotDistance::HalfMarathon => "Half Marathon",
            VdotDistance::Marathon => "Marathon",
        }
    }
}

impl fmt::Display for VdotDistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Equivalent race times, in minutes, at one fitness score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VdotReferencePoint {
    pub vdot: Decimal,
    pub five_k: Decimal,
    pub ten_k: Decimal,
    pub half_marathon: Decimal,
    pub marathon: Decimal,
}

impl VdotReferencePoint {
    pub fn new(
        vdot: Decimal,
        five_k: Decimal,
        ten_k: Decimal,
        half_marathon: Decimal,
        marathon: Decimal,
    ) -> Self {
        Self {
            vdot,
            five_k,
            ten_k,
            half_marathon,
            marathon,
        }
    }

    /// Reference time in minutes, synthesizing the 15K from 10K and half
    pub fn time_for(&self, distance: VdotDistance, fifteen_k_blend: Decimal) -> Decimal {
        match distance {
            VdotDistance::FiveK => self.five_k,
            VdotDistance::TenK => self.ten_k,
            VdotDistance::FifteenK => blend(self.ten_k, self.half_marathon, fifteen_k_blend),
            VdotDistance::HalfMarathon => self.half_marathon,
            VdotDistance::Marathon => self.marathon,
        }
    }
}

/// 15K position between the 10K and half-marathon times
fn blend(ten_k: Decimal, half_marathon: Decimal, factor: Decimal) -> Decimal {
    ten_k + factor * (half_marathon - ten_k)
}

/// Empirical constants of the lookup and extrapolation rules.
///
/// These have no derivation beyond fitting the reference data; keep them
/// fixed unless the table changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VdotConstants {
    /// 15K = 10K + blend × (half − 10K)
    pub fifteen_k_blend: Decimal,
    /// Closest-match distance (minutes) beyond which slow inputs extrapolate
    pub match_tolerance_minutes: Decimal,
    /// Score lost per multiple of the lowest reference time run slower
    pub slow_score_span: Decimal,
    /// Lowest score the reverse lookup will report
    pub score_floor: Decimal,
    /// Forward slowdown slope below the table
    pub slowdown_slope: Decimal,
    /// Forward speedup slope above the table
    pub speedup_slope: Decimal,
}

impl Default for VdotConstants {
    fn default() -> Self {
        Self {
            fifteen_k_blend: dec!(0.68),
            match_tolerance_minutes: dec!(5),
            slow_score_span: dec!(15),
            score_floor: dec!(20),
            slowdown_slope: dec!(0.5),
            speedup_slope: dec!(0.3),
        }
    }
}

/// A predicted time at one distance for a given score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VdotEquivalent {
    pub distance: VdotDistance,
    pub seconds: i64,
}

impl VdotEquivalent {
    pub fn formatted(&self) -> String {
        format_race_time(self.seconds)
    }
}

/// An ordered VDOT reference table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VdotTable {
    points: Vec<VdotReferencePoint>,
    constants: VdotConstants,
}

static DANIELS_TABLE: OnceLock<VdotTable> = OnceLock::new();

impl VdotTable {
    /// Build a table, checking the ordering the interpolation relies on:
    /// scores strictly increasing and positive, and every category's times
    /// positive and strictly decreasing as the score rises.
    pub fn new(
        points: Vec<VdotReferencePoint>,
        constants: VdotConstants,
    ) -> std::result::Result<Self, CalculationError> {
        if points.is_empty() {
            return Err(CalculationError::InvalidTable {
                reason: "table has no reference points".to_string(),
            });
        }

        for point in &points {
            if point.vdot <= Decimal::ZERO {
                return Err(CalculationError::InvalidTable {
                    reason: format!("score {} is not positive", point.vdot),
                });
            }
            for distance in VdotDistance::ALL {
                if point.time_for(distance, constants.fifteen_k_blend) <= Decimal::ZERO {
                    return Err(CalculationError::InvalidTable {
                        reason: format!("{} time at score {} is not positive", distance, point.vdot),
                    });
                }
            }
        }

        for pair in points.windows(2) {
            let (lower, upper) = (&pair[0], &pair[1]);
            if upper.vdot <= lower.vdot {
                return Err(CalculationError::InvalidTable {
                    reason: format!("score {} does not follow {}", upper.vdot, lower.vdot),
                });
            }
            for distance in VdotDistance::ALL {
                let slower = lower.time_for(distance, constants.fifteen_k_blend);
                let faster = upper.time_for(distance, constants.fifteen_k_blend);
                if faster >= slower {
                    return Err(CalculationError::InvalidTable {
                        reason: format!(
                            "{} time does not decrease from score {} to {}",
                            distance, lower.vdot, upper.vdot
                        ),
                    });
                }
            }
        }

        Ok(Self { points, constants })
    }

    /// Daniels' published equivalent times for scores 30 to 70
    pub fn daniels() -> &'static VdotTable {
        DANIELS_TABLE.get_or_init(|| VdotTable {
            points: daniels_points(),
            constants: VdotConstants::default(),
        })
    }

    pub fn points(&self) -> &[VdotReferencePoint] {
        &self.points
    }

    pub fn constants(&self) -> &VdotConstants {
        &self.constants
    }

    fn time_for(&self, point: &VdotReferencePoint, distance: VdotDistance) -> Decimal {
        point.time_for(distance, self.constants.fifteen_k_blend)
    }

    /// Fitness score for a performance, rounded to one decimal.
    ///
    /// Returns `None` for non-positive times and for distances without a
    /// reference category. Only inputs slower than the lowest score's time
    /// extrapolate; anything inside the table's time range snaps to the
    /// closest score even when it misses by more than the tolerance.
    pub fn calculate_vdot(&self, time_seconds: i64, distance_km: Decimal) -> Option<Decimal> {
        if time_seconds <= 0 {
            return None;
        }

        let Some(distance) = VdotDistance::from_km(distance_km) else {
            tracing::trace!(%distance_km, "No VDOT reference category for distance");
            return None;
        };

        let input_minutes = Decimal::from(time_seconds) / dec!(60);

        let (closest, difference) = self
            .points
            .iter()
            .map(|point| (point, (self.time_for(point, distance) - input_minutes).abs()))
            .min_by(|a, b| a.1.cmp(&b.1))?;

        let lowest = self.points.first()?;
        let lowest_time = self.time_for(lowest, distance);

        let score = if difference > self.constants.match_tolerance_minutes
            && input_minutes > lowest_time
        {
            let extra_minutes = input_minutes - lowest_time;
            let extrapolated = lowest.vdot - (extra_minutes / lowest_time) * self.constants.slow_score_span;
            tracing::debug!(
                %distance,
                %input_minutes,
                %extrapolated,
                "Performance slower than reference table, extrapolating score"
            );
            extrapolated.max(self.constants.score_floor)
        } else {
            closest.vdot
        };

        Some(score.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero))
    }

    /// Predicted time in minutes at a category, `None` for an empty table or
    /// an extrapolation that overflows
    pub fn predict_minutes(&self, score: Decimal, distance: VdotDistance) -> Option<Decimal> {
        let lowest = self.points.first()?;
        let highest = self.points.last()?;

        if score <= lowest.vdot {
            let below = lowest.vdot.checked_sub(score)? / lowest.vdot;
            let slowdown = Decimal::ONE.checked_add(below.checked_mul(self.constants.slowdown_slope)?)?;
            return self.time_for(lowest, distance).checked_mul(slowdown);
        }

        if score >= highest.vdot {
            let above = score.checked_sub(highest.vdot)? / highest.vdot;
            let speedup = Decimal::ONE.checked_sub(above.checked_mul(self.constants.speedup_slope)?)?;
            return self.time_for(highest, distance).checked_mul(speedup);
        }

        let pair = self
            .points
            .windows(2)
            .find(|pair| pair[0].vdot <= score && score <= pair[1].vdot)?;
        let (lower, upper) = (&pair[0], &pair[1]);
        let ratio = (score - lower.vdot) / (upper.vdot - lower.vdot);

        let lerp = |category: VdotDistance| {
            let from = lower.time_for(category, self.constants.fifteen_k_blend);
            let to = upper.time_for(category, self.constants.fifteen_k_blend);
            from + ratio * (to - from)
        };

        Some(match distance {
            VdotDistance::FifteenK => blend(
                lerp(VdotDistance::TenK),
                lerp(VdotDistance::HalfMarathon),
                self.constants.fifteen_k_blend,
            ),
            other => lerp(other),
        })
    }

    /// Predicted race time in whole seconds for a registry label
    pub fn predict_time(&self, score: Decimal, label: &str) -> Result<i64> {
        let distance = VdotDistance::from_label(label).ok_or_else(|| {
            CalculationError::UnsupportedDistance {
                calculation: "VDOT prediction".to_string(),
                label: label.to_string(),
            }
        })?;

        self.predict_seconds(score, distance)
    }

    /// Predicted race time in whole seconds for a category
    pub fn predict_seconds(&self, score: Decimal, distance: VdotDistance) -> Result<i64> {
        let minutes = self.predict_minutes(score, distance).ok_or_else(|| {
            CalculationError::InvalidParameter {
                calculation: "VDOT prediction".to_string(),
                parameter: "score".to_string(),
                value: score.to_string(),
            }
        })?;

        let seconds = minutes
            .checked_mul(dec!(60))
            .map(round_seconds)
            .ok_or_else(|| CalculationError::InvalidParameter {
                calculation: "VDOT prediction".to_string(),
                parameter: "score".to_string(),
                value: score.to_string(),
            })?;

        // Far above the table the speedup factor goes negative
        Ok(seconds.max(0))
    }

    /// Predictions for every category at one score
    pub fn race_equivalents(&self, score: Decimal) -> Result<Vec<VdotEquivalent>> {
        VdotDistance::ALL
            .into_iter()
            .map(|distance| {
                self.predict_seconds(score, distance)
                    .map(|seconds| VdotEquivalent { distance, seconds })
            })
            .collect()
    }
}

fn daniels_points() -> Vec<VdotReferencePoint> {
    vec![
        VdotReferencePoint::new(dec!(30), dec!(30.67), dec!(63.77), dec!(141.07), dec!(289.28)),
        VdotReferencePoint::new(dec!(35), dec!(27.00), dec!(56.05), dec!(124.22), dec!(257.48)),
        VdotReferencePoint::new(dec!(40), dec!(24.13), dec!(50.05), dec!(110.98), dec!(229.75)),
        VdotReferencePoint::new(dec!(45), dec!(21.83), dec!(45.27), dec!(100.33), dec!(207.57)),
        VdotReferencePoint::new(dec!(50), dec!(19.95), dec!(41.35), dec!(91.58), dec!(190.82)),
        VdotReferencePoint::new(dec!(55), dec!(18.37), dec!(38.10), dec!(84.30), dec!(176.02)),
        VdotReferencePoint::new(dec!(60), dec!(17.05), dec!(35.37), dec!(78.15), dec!(163.42)),
        VdotReferencePoint::new(dec!(65), dec!(15.90), dec!(33.02), dec!(72.88), dec!(152.58)),
        VdotReferencePoint::new(dec!(70), dec!(14.92), dec!(31.00), dec!(68.35), dec!(143.17)),
    ]
}

/// [`VdotTable::calculate_vdot`] against the built-in table. Times inside
/// the table's range never extrapolate.
pub fn calculate_vdot(time_seconds: i64, distance_km: Decimal) -> Option<Decimal> {
    VdotTable::daniels().calculate_vdot(time_seconds, distance_km)
}

/// [`VdotTable::predict_time`] against the built-in table
pub fn predict_time(score: Decimal, label: &str) -> Result<i64> {
    VdotTable::daniels().predict_time(score, label)
}

/// [`VdotTable::race_equivalents`] against the built-in table
pub fn race_equivalents(score: Decimal) -> Result<Vec<VdotEquivalent>> {
    VdotTable::daniels().race_equivalents(score)
}
