//! Performance-level guidance for paces and race times
//!
//! Buckets a training pace or a race result into a coarse performance level
//! and attaches training suggestions for that level.

use serde::Serialize;
use std::fmt;

use crate::conversion::{format_pace, format_race_time};
use crate::models::Unit;

/// Coarse performance levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PerformanceLevel {
    EliteCompetitive,
    Elite,
    Competitive,
    Advanced,
    Good,
    Intermediate,
    Average,
    BeginnerToIntermediate,
    Beginner,
}

impl fmt::Display for PerformanceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PerformanceLevel::EliteCompetitive => "Elite/Competitive",
            PerformanceLevel::Elite => "Elite",
            PerformanceLevel::Competitive => "Competitive",
            PerformanceLevel::Advanced => "Advanced",
            PerformanceLevel::Good => "Good",
            PerformanceLevel::Intermediate => "Intermediate",
            PerformanceLevel::Average => "Average",
            PerformanceLevel::BeginnerToIntermediate => "Beginner to Intermediate",
            PerformanceLevel::Beginner => "Beginner",
        };
        f.write_str(name)
    }
}

/// Guidance for a training pace
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaceGuidance {
    pub level: PerformanceLevel,
    pub description: String,
    pub tips: Vec<&'static str>,
}

/// Guidance for a race result or goal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RaceGuidance {
    pub level: PerformanceLevel,
    pub description: String,
    pub tips: Vec<&'static str>,
}

/// Classify a per-unit pace in seconds. `None` for non-positive paces.
pub fn pace_guidance(pace_seconds: i64, unit: Unit) -> Option<PaceGuidance> {
    if pace_seconds <= 0 {
        return None;
    }

    let pace = format_pace(pace_seconds);
    let per = unit.long_name();

    let (level, description, tips) = if pace_seconds < 300 {
        (
            PerformanceLevel::EliteCompetitive,
            format!(
                "Your {} per {} pace is in the elite range. This pace suggests you're a highly trained competitive runner.",
                pace, per
            ),
            vec![
                "Focus on speed maintenance and injury prevention",
                "Include regular tempo runs and interval training",
                "Ensure adequate recovery between intense sessions",
            ],
        )
    } else if pace_seconds < 420 {
        (
            PerformanceLevel::Advanced,
            format!(
                "Your {} per {} pace indicates advanced fitness. You're likely an experienced runner with consistent training.",
                pace, per
            ),
            vec![
                "Mix tempo runs, intervals, and long runs for balanced training",
                "Consider incorporating hill training for strength",
                "Track weekly mileage and gradually increase volume",
            ],
        )
    } else if pace_seconds < 540 {
        (
            PerformanceLevel::Intermediate,
            format!(
                "Your {} per {} pace shows solid running fitness. You're building endurance and speed effectively.",
                pace, per
            ),
            vec![
                "Focus on building aerobic base with easy runs",
                "Add one tempo run per week for lactate threshold improvement",
                "Include one long run weekly to build endurance",
            ],
        )
    } else if pace_seconds < 720 {
        (
            PerformanceLevel::BeginnerToIntermediate,
            format!(
                "Your {} per {} pace is great for building your running foundation. Consistency is key at this stage.",
                pace, per
            ),
            vec![
                "Run at a conversational pace most days",
                "Gradually increase weekly mileage by 10%",
                "Focus on time on feet rather than speed initially",
            ],
        )
    } else {
        (
            PerformanceLevel::Beginner,
            format!(
                "Your {} per {} pace is perfect for starting your running journey. Every step is building your fitness.",
                pace, per
            ),
            vec![
                "Start with walk-run intervals to build endurance",
                "Aim for 3-4 running sessions per week",
                "Focus on completing the distance, not the speed",
            ],
        )
    };

    Some(PaceGuidance {
        level,
        description,
        tips,
    })
}

/// Upper bounds (exclusive, seconds) for Elite, Competitive, Good and Average
fn race_thresholds(distance_label: &str) -> Option<[i64; 4]> {
    match distance_label.to_lowercase().as_str() {
        "5k" => Some([900, 1200, 1500, 1800]),
        "10k" => Some([1800, 2400, 3000, 3600]),
        "half marathon" => Some([4200, 5400, 6600, 7800]),
        "marathon" => Some([9000, 10800, 12600, 15600]),
        _ => None,
    }
}

fn race_tips(level: PerformanceLevel, distance_label: &str) -> Vec<&'static str> {
    let label = distance_label.to_lowercase();
    match (level, label.as_str()) {
        (PerformanceLevel::Elite, "5k") => vec!["Focus on speed maintenance", "Track and field experience shows"],
        (PerformanceLevel::Competitive, "5k") => vec!["Strong aerobic base", "Regular interval training"],
        (PerformanceLevel::Good, "5k") => vec!["Solid fitness level", "Room for speed improvement"],
        (PerformanceLevel::Average, "5k") => vec!["Building endurance", "Focus on consistency"],
        (PerformanceLevel::Beginner, "5k") => vec!["Great starting point", "Focus on completing the distance"],

        (PerformanceLevel::Elite, "10k") => vec!["Olympic-level performance", "Professional training required"],
        (PerformanceLevel::Competitive, "10k") => vec!["Club-level racing", "Structured training plan"],
        (PerformanceLevel::Good, "10k") => vec!["Strong recreational runner", "Regular training shows"],
        (PerformanceLevel::Average, "10k") => vec!["Building endurance", "Consistent effort pays off"],
        (PerformanceLevel::Beginner, "10k") => vec!["Excellent goal achievement", "Focus on gradual improvement"],

        (PerformanceLevel::Elite, "half marathon") => vec!["Professional-level fitness", "Years of dedicated training"],
        (PerformanceLevel::Competitive, "half marathon") => vec!["Excellent club runner", "High weekly mileage"],
        (PerformanceLevel::Good, "half marathon") => vec!["Strong recreational athlete", "Consistent training base"],
        (PerformanceLevel::Average, "half marathon") => vec!["Solid endurance", "Room for improvement with training"],
        (PerformanceLevel::Beginner, "half marathon") => vec!["Great accomplishment", "Focus on building mileage gradually"],

        (PerformanceLevel::Elite, "marathon") => vec!["World-class performance", "Elite athlete training"],
        (PerformanceLevel::Competitive, "marathon") => vec!["Boston qualifier level", "Serious training commitment"],
        (PerformanceLevel::Good, "marathon") => vec!["Strong recreational marathoner", "Excellent endurance base"],
        (PerformanceLevel::Average, "marathon") => vec!["Solid marathon performance", "Consistent training shows"],
        (PerformanceLevel::Beginner, "marathon") => vec!["Amazing achievement", "26.2 miles is no small feat"],

        _ => vec!["Solid performance", "Keep up the training"],
    }
}

/// Classify a race time for a distance label. `None` for non-positive times.
///
/// Distances without thresholds are reported as `Good`.
pub fn race_guidance(total_seconds: i64, distance_label: &str) -> Option<RaceGuidance> {
    if total_seconds <= 0 {
        return None;
    }

    let level = match race_thresholds(distance_label) {
        Some([elite, competitive, good, average]) => {
            if total_seconds < elite {
                PerformanceLevel::Elite
            } else if total_seconds < competitive {
                PerformanceLevel::Competitive
            } else if total_seconds < good {
                PerformanceLevel::Good
            } else if total_seconds < average {
                PerformanceLevel::Average
            } else {
                PerformanceLevel::Beginner
            }
        }
        None => PerformanceLevel::Good,
    };

    let description = format!(
        "Your {} {} goal represents {} performance level.",
        format_race_time(total_seconds),
        distance_label,
        level.to_string().to_lowercase()
    );

    Some(RaceGuidance {
        level,
        description,
        tips: race_tips(level, distance_label),
    })
}
