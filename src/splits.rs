//! Split schedule generation
//!
//! Spreads a goal time over equal sub-distances with a linear pacing bias.
//! A bias of 0 gives even splits; a positive bias starts slower and finishes
//! faster (negative splits); a negative bias does the reverse.
//!
//! Bias values outside `[-1, 1]` are not rejected. They produce
//! proportionally larger pace swings, and a large enough bias drives early or
//! late segment paces to zero or below. Clamp before calling when bounded
//! behavior is needed.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::fmt;

use crate::conversion::{format_pace, round_seconds};
use crate::distances::RaceDistance;
use crate::models::Unit;

/// One segment of a split schedule
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplitSegment {
    /// 1-based segment number
    pub index: u32,
    /// Pace for this segment, seconds per unit
    pub pace_seconds: Decimal,
    /// Time to cover this segment
    pub segment_time_seconds: Decimal,
    /// Segment pace over average pace, for proportional rendering only
    pub relative_width: Decimal,
}

impl SplitSegment {
    /// Pace as `M:SS`, rounded to the nearest second
    pub fn formatted_pace(&self) -> String {
        format_pace(round_seconds(self.pace_seconds))
    }

    /// Segment time as `M:SS`, rounded to the nearest second
    pub fn formatted_time(&self) -> String {
        format_pace(round_seconds(self.segment_time_seconds))
    }
}

/// Pacing strategy implied by a bias factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SplitProfile {
    Even,
    Negative,
    Positive,
}

impl SplitProfile {
    pub fn from_bias(bias_factor: Decimal) -> Self {
        if bias_factor.is_zero() {
            SplitProfile::Even
        } else if bias_factor > Decimal::ZERO {
            SplitProfile::Negative
        } else {
            SplitProfile::Positive
        }
    }
}

impl fmt::Display for SplitProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplitProfile::Even => write!(f, "Even Splits"),
            SplitProfile::Negative => write!(f, "Negative Splits (Speed Up)"),
            SplitProfile::Positive => write!(f, "Positive Splits (Slow Down)"),
        }
    }
}

/// A derived, transient pacing plan
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplitSchedule {
    pub goal_time_seconds: i64,
    pub total_distance: Decimal,
    pub bias_factor: Decimal,
    /// Goal time over total distance, zero for an empty schedule
    pub average_pace_seconds: Decimal,
    pub segments: Vec<SplitSegment>,
}

impl SplitSchedule {
    fn empty(goal_time_seconds: i64, total_distance: Decimal, bias_factor: Decimal) -> Self {
        Self {
            goal_time_seconds,
            total_distance,
            bias_factor,
            average_pace_seconds: Decimal::ZERO,
            segments: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn profile(&self) -> SplitProfile {
        SplitProfile::from_bias(self.bias_factor)
    }

    /// Sum of segment times
    pub fn total_time_seconds(&self) -> Decimal {
        self.segments.iter().map(|s| s.segment_time_seconds).sum()
    }

    /// Elapsed time at the end of each segment
    pub fn cumulative_times(&self) -> Vec<Decimal> {
        self.segments
            .iter()
            .scan(Decimal::ZERO, |elapsed, segment| {
                *elapsed += segment.segment_time_seconds;
                Some(*elapsed)
            })
            .collect()
    }
}

/// Distribute `goal_time_seconds` over `split_count` equal segments of
/// `total_distance`.
///
/// Returns an empty schedule when `split_count < 2`, the goal time is not
/// positive or the distance is not positive, and also when the arithmetic
/// leaves the `Decimal` range (an extreme bias or a vanishing distance).
pub fn generate_splits(
    goal_time_seconds: i64,
    total_distance: Decimal,
    split_count: u32,
    bias_factor: Decimal,
) -> SplitSchedule {
    if split_count < 2 || goal_time_seconds <= 0 || total_distance <= Decimal::ZERO {
        tracing::debug!(
            goal_time_seconds,
            %total_distance,
            split_count,
            "Split schedule preconditions not met"
        );
        return SplitSchedule::empty(goal_time_seconds, total_distance, bias_factor);
    }

    match build_segments(goal_time_seconds, total_distance, split_count, bias_factor) {
        Some((average_pace, segments)) => SplitSchedule {
            goal_time_seconds,
            total_distance,
            bias_factor,
            average_pace_seconds: average_pace,
            segments,
        },
        None => {
            tracing::debug!(
                goal_time_seconds,
                %total_distance,
                %bias_factor,
                "Split schedule arithmetic out of range"
            );
            SplitSchedule::empty(goal_time_seconds, total_distance, bias_factor)
        }
    }
}

/// Average pace and segments, or `None` when a step overflows or the
/// average pace is too small to represent. The running total is checked
/// too, so summing a returned schedule cannot overflow.
fn build_segments(
    goal_time_seconds: i64,
    total_distance: Decimal,
    split_count: u32,
    bias_factor: Decimal,
) -> Option<(Decimal, Vec<SplitSegment>)> {
    let average_pace = Decimal::from(goal_time_seconds).checked_div(total_distance)?;
    if average_pace.is_zero() {
        return None;
    }
    let segment_distance = total_distance.checked_div(Decimal::from(split_count))?;
    let last_index = Decimal::from(split_count - 1);

    let mut elapsed = Decimal::ZERO;
    let mut segments = Vec::with_capacity(split_count as usize);

    for i in 0..split_count {
        let progress = Decimal::from(i) / last_index;
        // At bias 1 the first segment runs 20% over average pace, the last 20% under
        let pace_multiplier = if bias_factor.is_zero() {
            Decimal::ONE
        } else {
            let swing = bias_factor
                .checked_mul(dec!(0.5) - progress)?
                .checked_mul(dec!(0.4))?;
            Decimal::ONE.checked_add(swing)?
        };
        let pace_seconds = average_pace.checked_mul(pace_multiplier)?;
        let segment_time_seconds = pace_seconds.checked_mul(segment_distance)?;
        elapsed = elapsed.checked_add(segment_time_seconds)?;

        segments.push(SplitSegment {
            index: i + 1,
            pace_seconds,
            segment_time_seconds,
            relative_width: pace_seconds.checked_div(average_pace)?,
        });
    }

    Some((average_pace, segments))
}

/// Schedule over a registry distance using its whole-unit split count
pub fn splits_for_distance(
    goal_time_seconds: i64,
    distance: &RaceDistance,
    unit: Unit,
    bias_factor: Decimal,
) -> SplitSchedule {
    generate_splits(
        goal_time_seconds,
        distance.in_unit(unit),
        distance.splits_for(unit),
        bias_factor,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distances::distance_by_label;

    fn approx_eq(a: Decimal, b: Decimal) -> bool {
        (a - b).abs() < dec!(0.000001)
    }

    #[test]
    fn test_even_splits() {
        let schedule = generate_splits(2400, dec!(4), 4, dec!(0));

        assert_eq!(schedule.len(), 4);
        assert_eq!(schedule.average_pace_seconds, dec!(600));
        for segment in &schedule.segments {
            assert_eq!(segment.pace_seconds, dec!(600));
            assert_eq!(segment.segment_time_seconds, dec!(600));
            assert_eq!(segment.relative_width, dec!(1));
        }
        assert_eq!(schedule.profile(), SplitProfile::Even);
    }

    #[test]
    fn test_negative_splits() {
        // 40:00 over 4 units, start slow and finish fast
        let schedule = generate_splits(2400, dec!(4), 4, dec!(1));
        let paces: Vec<Decimal> = schedule.segments.iter().map(|s| s.pace_seconds).collect();

        assert!(paces[0] > schedule.average_pace_seconds);
        assert!(paces[3] < schedule.average_pace_seconds);
        assert!(paces.windows(2).all(|w| w[0] > w[1]));
        // First segment: 600 × (1 + 0.5 × 0.4)
        assert_eq!(paces[0], dec!(720));
        assert_eq!(paces[3], dec!(480));
        assert_eq!(schedule.profile(), SplitProfile::Negative);
    }

    #[test]
    fn test_positive_splits() {
        let schedule = generate_splits(2400, dec!(4), 4, dec!(-0.5));
        let paces: Vec<Decimal> = schedule.segments.iter().map(|s| s.pace_seconds).collect();

        assert!(paces.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(schedule.profile(), SplitProfile::Positive);
        assert_eq!(schedule.profile().to_string(), "Positive Splits (Slow Down)");
    }

    #[test]
    fn test_segment_times_sum_to_goal() {
        let marathon = distance_by_label("Marathon").unwrap();
        for bias in [dec!(-1), dec!(-0.3), dec!(0), dec!(0.7), dec!(1)] {
            let schedule = splits_for_distance(12600, marathon, Unit::Mile, bias);
            assert_eq!(schedule.len(), 26);
            assert!(approx_eq(schedule.total_time_seconds(), dec!(12600)));
        }
    }

    #[test]
    fn test_indexes_and_cumulative_times() {
        let schedule = generate_splits(1500, dec!(5), 5, dec!(0.5));
        let indexes: Vec<u32> = schedule.segments.iter().map(|s| s.index).collect();
        assert_eq!(indexes, vec![1, 2, 3, 4, 5]);

        let cumulative = schedule.cumulative_times();
        assert_eq!(cumulative.len(), 5);
        assert!(cumulative.windows(2).all(|w| w[0] < w[1]));
        assert!(approx_eq(*cumulative.last().unwrap(), dec!(1500)));
    }

    #[test]
    fn test_relative_width_tracks_pace() {
        let schedule = generate_splits(2400, dec!(4), 4, dec!(1));
        assert_eq!(schedule.segments[0].relative_width, dec!(1.2));
        assert_eq!(schedule.segments[3].relative_width, dec!(0.8));
    }

    #[test]
    fn test_preconditions_yield_empty_schedule() {
        assert!(generate_splits(2400, dec!(4), 1, dec!(0)).is_empty());
        assert!(generate_splits(2400, dec!(4), 0, dec!(0)).is_empty());
        assert!(generate_splits(0, dec!(4), 4, dec!(0)).is_empty());
        assert!(generate_splits(-100, dec!(4), 4, dec!(0)).is_empty());
        assert!(generate_splits(2400, dec!(0), 4, dec!(0)).is_empty());

        let empty = generate_splits(2400, dec!(0), 4, dec!(0));
        assert_eq!(empty.average_pace_seconds, Decimal::ZERO);
        assert_eq!(empty.total_time_seconds(), Decimal::ZERO);
    }

    #[test]
    fn test_bias_outside_unit_range_is_accepted() {
        let schedule = generate_splits(2400, dec!(4), 4, dec!(3));
        // 1 + 3 × 0.5 × 0.4 = 1.6
        assert_eq!(schedule.segments[0].relative_width, dec!(1.6));
        assert_eq!(schedule.segments[3].relative_width, dec!(0.4));
    }

    #[test]
    fn test_out_of_range_arithmetic_yields_empty_schedule() {
        assert!(generate_splits(2400, dec!(4), 4, Decimal::MAX).is_empty());
        assert!(generate_splits(2400, dec!(4), 4, Decimal::MIN).is_empty());
        assert!(generate_splits(i64::MAX, Decimal::new(1, 20), 2, dec!(0)).is_empty());
        assert!(generate_splits(1, Decimal::MAX, 2, dec!(0)).is_empty());

        let empty = generate_splits(2400, dec!(4), 4, Decimal::MAX);
        assert_eq!(empty.total_time_seconds(), Decimal::ZERO);
        assert!(empty.cumulative_times().is_empty());
    }

    #[test]
    fn test_large_bias_within_range_still_sums_to_goal() {
        let schedule = generate_splits(2400, dec!(4), 4, dec!(1000000));
        assert_eq!(schedule.len(), 4);
        assert!(approx_eq(schedule.total_time_seconds(), dec!(2400)));
    }

    #[test]
    fn test_km_schedule_uses_km_split_count() {
        let half = distance_by_label("Half Marathon").unwrap();
        let schedule = splits_for_distance(6300, half, Unit::Km, dec!(0));
        assert_eq!(schedule.len(), 21);
        assert_eq!(schedule.total_distance, dec!(21.0975));
    }

    #[test]
    fn test_formatting_rounds_at_display() {
        let schedule = generate_splits(1505, dec!(5), 5, dec!(0));
        assert_eq!(schedule.segments[0].formatted_pace(), "5:01");
        assert_eq!(schedule.segments[0].formatted_time(), "5:01");

        // 359.6s rounds up into the next minute rather than showing 5:60
        let schedule = generate_splits(1798, dec!(5), 5, dec!(0));
        assert_eq!(schedule.segments[0].formatted_pace(), "6:00");
    }
}
