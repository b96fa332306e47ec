//! Time and pace conversion
//!
//! Converts between whole-second totals and their structured forms, and
//! formats/parses the display strings used throughout the calculators.
//!
//! Input normalization happens once, at the boundary: the `*_lenient`
//! functions and [`parse_component`] turn user-entered strings into numbers
//! with `parseInt`-style leniency (empty or non-numeric input is zero), so the
//! arithmetic below never has to guard against missing values.
//!
//! Negative components are not rejected. `time_to_seconds(0, -5, 0)` is
//! `-300`; callers that need non-negative durations check before display, and
//! the formatters render negative totals as placeholders.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

use crate::models::{PaceComponents, TimeComponents};

/// Placeholder for a race time that cannot be computed
pub const RACE_TIME_PLACEHOLDER: &str = "--:--:--";

/// Placeholder for a pace that cannot be computed
pub const PACE_PLACEHOLDER: &str = "--:--";

/// Placeholder for a verbose duration that cannot be computed
pub const VERBOSE_PLACEHOLDER: &str = "--";

/// Parse a user-entered integer the way `parseInt` does.
///
/// Leading whitespace and an optional sign are accepted, then digits are
/// consumed up to the first non-digit. Anything without leading digits
/// (including the empty string) is `0`.
pub fn parse_component(input: &str) -> i64 {
    let trimmed = input.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let value = digits
        .bytes()
        .take_while(|b| b.is_ascii_digit())
        .fold(0i64, |acc, b| {
            acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
        });

    if negative {
        -value
    } else {
        value
    }
}

/// Convert hours, minutes and seconds to total seconds, saturating at the
/// `i64` bounds
pub fn time_to_seconds(hours: i64, minutes: i64, seconds: i64) -> i64 {
    hours
        .saturating_mul(3600)
        .saturating_add(minutes.saturating_mul(60))
        .saturating_add(seconds)
}

/// [`time_to_seconds`] over raw form input
pub fn time_to_seconds_lenient(hours: &str, minutes: &str, seconds: &str) -> i64 {
    time_to_seconds(
        parse_component(hours),
        parse_component(minutes),
        parse_component(seconds),
    )
}

/// Convert a minutes/seconds pace to total seconds per unit, saturating at
/// the `i64` bounds
pub fn pace_to_seconds(minutes: i64, seconds: i64) -> i64 {
    minutes.saturating_mul(60).saturating_add(seconds)
}

/// [`pace_to_seconds`] over raw form input
pub fn pace_to_seconds_lenient(minutes: &str, seconds: &str) -> i64 {
    pace_to_seconds(parse_component(minutes), parse_component(seconds))
}

/// Floor-based decomposition of a total into hours, minutes and seconds
pub fn seconds_to_time(total_seconds: i64) -> TimeComponents {
    TimeComponents {
        hours: total_seconds.div_euclid(3600),
        minutes: total_seconds.rem_euclid(3600).div_euclid(60),
        seconds: total_seconds.rem_euclid(60),
    }
}

/// Floor-based decomposition of a per-unit pace into minutes and seconds
pub fn seconds_to_pace(total_seconds: i64) -> PaceComponents {
    PaceComponents {
        minutes: total_seconds.div_euclid(60),
        seconds: total_seconds.rem_euclid(60),
    }
}

/// Format as `H:MM:SS` when there are hours, otherwise `M:SS`
pub fn format_race_time(seconds: i64) -> String {
    if seconds < 0 {
        return RACE_TIME_PLACEHOLDER.to_string();
    }

    let time = seconds_to_time(seconds);
    if time.hours > 0 {
        format!("{}:{:02}:{:02}", time.hours, time.minutes, time.seconds)
    } else {
        format!("{}:{:02}", time.minutes, time.seconds)
    }
}

/// Format a per-unit pace as `M:SS`
pub fn format_pace(seconds: i64) -> String {
    if seconds < 0 {
        return PACE_PLACEHOLDER.to_string();
    }
    seconds_to_pace(seconds).to_string()
}

/// Format as `Hh Mm Ss` for finish-time summaries
pub fn format_verbose(seconds: i64) -> String {
    if seconds < 0 {
        return VERBOSE_PLACEHOLDER.to_string();
    }

    let time = seconds_to_time(seconds);
    format!("{}h {}m {}s", time.hours, time.minutes, time.seconds)
}

/// Parse `H:MM:SS` or `M:SS` into total seconds.
///
/// Each part may be empty (zero) or a whole number. Any other shape,
/// including a non-numeric part, yields `0`.
pub fn parse_time_to_seconds(time: &str) -> i64 {
    let parts: Option<Vec<i64>> = time
        .split(':')
        .map(|part| {
            let part = part.trim();
            if part.is_empty() {
                Some(0)
            } else {
                part.parse::<i64>().ok()
            }
        })
        .collect();

    match parts.as_deref() {
        Some([hours, minutes, seconds]) => time_to_seconds(*hours, *minutes, *seconds),
        Some([minutes, seconds]) => pace_to_seconds(*minutes, *seconds),
        _ => 0,
    }
}

/// Round fractional seconds to the nearest whole second, halves away from zero
pub fn round_seconds(value: Decimal) -> i64 {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(0)
}

/// Truncate fractional seconds towards negative infinity
pub fn floor_seconds(value: Decimal) -> i64 {
    value.floor().to_i64().unwrap_or(0)
}
