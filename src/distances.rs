//! Race distance registry
//!
//! A fixed, ordered catalog of the race distances offered by the calculators.
//! Order is display order only. Mile values are tabulated independently of
//! the kilometre values and are kept as stored data rather than converted.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::sync::OnceLock;

use crate::error::{GoPaceError, Result};
use crate::models::Unit;

/// A named race distance with both unit equivalents
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RaceDistance {
    /// Unique display name
    pub label: &'static str,
    /// Abbreviation for compact selectors
    pub short_label: &'static str,
    /// Distance in kilometres
    pub km: Decimal,
    /// Distance in miles (tabulated, not derived from `km`)
    pub miles: Decimal,
    /// Whole-mile segments in a mile split schedule
    pub mile_splits: u32,
    /// Whole-kilometre segments in a kilometre split schedule
    pub km_splits: u32,
}

impl RaceDistance {
    /// Distance expressed in the given unit
    pub fn in_unit(&self, unit: Unit) -> Decimal {
        match unit {
            Unit::Mile => self.miles,
            Unit::Km => self.km,
        }
    }

    /// Number of split segments for the given unit
    pub fn splits_for(&self, unit: Unit) -> u32 {
        match unit {
            Unit::Mile => self.mile_splits,
            Unit::Km => self.km_splits,
        }
    }
}

static RACE_DISTANCES: OnceLock<Vec<RaceDistance>> = OnceLock::new();

/// The ordered registry, built once on first use
pub fn race_distances() -> &'static [RaceDistance] {
    RACE_DISTANCES.get_or_init(|| {
        vec![
            RaceDistance {
                label: "5K",
                short_label: "5K",
                km: dec!(5),
                miles: dec!(3.106),
                mile_splits: 3,
                km_splits: 5,
            },
            RaceDistance {
                label: "10K",
                short_label: "10K",
                km: dec!(10),
                miles: dec!(6.213),
                mile_splits: 6,
                km_splits: 10,
            },
            RaceDistance {
                label: "15K",
                short_label: "15K",
                km: dec!(15),
                miles: dec!(9.32),
                mile_splits: 9,
                km_splits: 15,
            },
            RaceDistance {
                label: "Half Marathon",
                short_label: "Half",
                km: dec!(21.0975),
                miles: dec!(13.109),
                mile_splits: 13,
                km_splits: 21,
            },
            RaceDistance {
                label: "Marathon",
                short_label: "Marathon",
                km: dec!(42.195),
                miles: dec!(26.219),
                mile_splits: 26,
                km_splits: 42,
            },
        ]
    })
}

/// Look up a distance by its exact display label
pub fn distance_by_label(label: &str) -> Option<&'static RaceDistance> {
    race_distances().iter().find(|d| d.label == label)
}

/// Look up by label or short label, ignoring case. Used at the CLI boundary.
pub fn find_distance(name: &str) -> Result<&'static RaceDistance> {
    let needle = name.trim();
    race_distances()
        .iter()
        .find(|d| {
            d.label.eq_ignore_ascii_case(needle) || d.short_label.eq_ignore_ascii_case(needle)
        })
        .ok_or_else(|| GoPaceError::UnknownDistance {
            label: name.to_string(),
        })
}

/// Display labels in registry order
pub fn distance_labels() -> Vec<&'static str> {
    race_distances().iter().map(|d| d.label).collect()
}
