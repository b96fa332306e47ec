//! Pace calculator operations
//!
//! The "pace → finish time" and "goal time → required pace" calculations,
//! plus the Riegel prediction list, shaped for display. String-taking
//! functions accept raw form input and return placeholders rather than
//! errors when there is nothing to compute.

use rust_decimal::Decimal;

use crate::conversion::{
    floor_seconds, format_pace, format_verbose, pace_to_seconds_lenient, round_seconds,
    seconds_to_time, time_to_seconds_lenient, PACE_PLACEHOLDER, RACE_TIME_PLACEHOLDER,
};
use crate::distances::RaceDistance;
use crate::models::{LabeledTime, Unit};
use crate::riegel;

/// Finish time for a per-unit pace, rounded to the nearest second
pub fn finish_time_seconds(pace_seconds: i64, distance: &RaceDistance, unit: Unit) -> Option<i64> {
    if pace_seconds <= 0 {
        return None;
    }
    Decimal::from(pace_seconds)
        .checked_mul(distance.in_unit(unit))
        .map(round_seconds)
}

/// Pace needed to finish in `goal_seconds`, truncated to whole seconds
pub fn required_pace_seconds(goal_seconds: i64, distance: &RaceDistance, unit: Unit) -> Option<i64> {
    average_pace(goal_seconds, distance.in_unit(unit)).map(floor_seconds)
}

/// Exact average pace over a distance
pub fn average_pace(goal_seconds: i64, total_distance: Decimal) -> Option<Decimal> {
    if goal_seconds <= 0 || total_distance <= Decimal::ZERO {
        return None;
    }
    Decimal::from(goal_seconds).checked_div(total_distance)
}

/// Finish time as `H:MM:SS` from pace form input
pub fn calculate_finish_time(
    pace_minutes: &str,
    pace_seconds: &str,
    distance: &RaceDistance,
    unit: Unit,
) -> String {
    let pace = pace_to_seconds_lenient(pace_minutes, pace_seconds);
    match finish_time_seconds(pace, distance, unit) {
        Some(total) => seconds_to_time(total).to_string(),
        None => RACE_TIME_PLACEHOLDER.to_string(),
    }
}

/// Required pace as `M:SS` from goal-time form input
pub fn calculate_required_pace(
    hours: &str,
    minutes: &str,
    seconds: &str,
    distance: &RaceDistance,
    unit: Unit,
) -> String {
    let goal = time_to_seconds_lenient(hours, minutes, seconds);
    match required_pace_seconds(goal, distance, unit) {
        Some(pace) => format_pace(pace),
        None => PACE_PLACEHOLDER.to_string(),
    }
}

/// Verbose finish times for every distance at one pace
pub fn calculate_all_finish_times(
    pace_minutes: &str,
    pace_seconds: &str,
    distances: &[RaceDistance],
    unit: Unit,
) -> Vec<LabeledTime> {
    let pace = pace_to_seconds_lenient(pace_minutes, pace_seconds);

    distances
        .iter()
        .map(|distance| {
            let time = finish_time_seconds(pace, distance, unit)
                .map(format_verbose)
                .unwrap_or_else(|| format_verbose(0));
            LabeledTime::new(distance.label, time)
        })
        .collect()
}

/// Riegel predictions as `H:MM:SS` for every target except the base.
///
/// Empty when the base time is zero.
pub fn predict_race_times(
    hours: &str,
    minutes: &str,
    seconds: &str,
    base: &RaceDistance,
    targets: &[RaceDistance],
) -> Vec<LabeledTime> {
    let base_time = time_to_seconds_lenient(hours, minutes, seconds);
    if base_time == 0 {
        return Vec::new();
    }

    riegel::predict_all(base_time, base, targets)
        .into_iter()
        .map(|prediction| {
            let time = prediction
                .seconds
                .map(|s| seconds_to_time(s).to_string())
                .unwrap_or_else(|| RACE_TIME_PLACEHOLDER.to_string());
            LabeledTime::new(prediction.label, time)
        })
        .collect()
}
