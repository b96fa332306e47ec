//! Rendering of calculation results as JSON, CSV or terminal tables

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tabled::Tabled;
use thiserror::Error;

use crate::conversion::{format_race_time, round_seconds};
use crate::distances::RaceDistance;
use crate::error::GoPaceError;
use crate::models::LabeledTime;
use crate::splits::SplitSchedule;

pub mod csv;
pub mod json;
pub mod table;

/// Output formats for result commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "table" | "text" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(ExportError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Export errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<ExportError> for GoPaceError {
    fn from(err: ExportError) -> Self {
        GoPaceError::Export(err.to_string())
    }
}

/// One row of a split table
#[derive(Debug, Clone, PartialEq, Serialize, Tabled)]
pub struct SplitRow {
    #[tabled(rename = "Split")]
    pub split: u32,
    #[tabled(rename = "Pace")]
    pub pace: String,
    #[tabled(rename = "Segment")]
    pub segment_time: String,
    #[tabled(rename = "Elapsed")]
    pub elapsed: String,
}

/// A labeled duration row (finish times, predictions, equivalents)
#[derive(Debug, Clone, PartialEq, Serialize, Tabled)]
pub struct TimeRow {
    #[tabled(rename = "Distance")]
    pub distance: String,
    #[tabled(rename = "Time")]
    pub time: String,
}

/// A registry entry row
#[derive(Debug, Clone, PartialEq, Serialize, Tabled)]
pub struct DistanceRow {
    #[tabled(rename = "Distance")]
    pub distance: String,
    #[tabled(rename = "Km")]
    pub km: String,
    #[tabled(rename = "Miles")]
    pub miles: String,
    #[tabled(rename = "Mile splits")]
    pub mile_splits: u32,
    #[tabled(rename = "Km splits")]
    pub km_splits: u32,
}

/// Display rows for a split schedule; times round only at this point
pub fn split_rows(schedule: &SplitSchedule) -> Vec<SplitRow> {
    schedule
        .segments
        .iter()
        .zip(schedule.cumulative_times())
        .map(|(segment, elapsed)| SplitRow {
            split: segment.index,
            pace: segment.formatted_pace(),
            segment_time: segment.formatted_time(),
            elapsed: format_race_time(round_seconds(elapsed)),
        })
        .collect()
}

pub fn time_rows(times: &[LabeledTime]) -> Vec<TimeRow> {
    times
        .iter()
        .map(|t| TimeRow {
            distance: t.label.clone(),
            time: t.time.clone(),
        })
        .collect()
}

pub fn distance_rows(distances: &[RaceDistance]) -> Vec<DistanceRow> {
    distances
        .iter()
        .map(|d| DistanceRow {
            distance: d.label.to_string(),
            km: d.km.normalize().to_string(),
            miles: d.miles.normalize().to_string(),
            mile_splits: d.mile_splits,
            km_splits: d.km_splits,
        })
        .collect()
}

/// Render rows as a table or CSV. JSON callers serialize the full result
/// with [`json::to_json`] instead, so rows are rendered as JSON arrays here.
pub fn render_rows<T>(rows: &[T], format: OutputFormat) -> Result<String, ExportError>
where
    T: Serialize + Tabled,
{
    match format {
        OutputFormat::Table => Ok(table::to_table(rows)),
        OutputFormat::Csv => csv::to_csv(rows),
        OutputFormat::Json => json::to_json(&rows),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distances::race_distances;
    use crate::splits::generate_splits;
    use rust_decimal_macros::dec;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("CSV".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert_eq!("table".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
        assert!("pdf".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_export_error_converts() {
        let err: GoPaceError = ExportError::UnsupportedFormat("xml".to_string()).into();
        assert!(matches!(err, GoPaceError::Export(_)));
    }

    #[test]
    fn test_split_rows() {
        let schedule = generate_splits(2400, dec!(4), 4, dec!(0));
        let rows = split_rows(&schedule);

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].pace, "10:00");
        assert_eq!(rows[1].elapsed, "20:00");
        assert_eq!(rows[3].elapsed, "40:00");
    }

    #[test]
    fn test_distance_rows() {
        let rows = distance_rows(race_distances());
        assert_eq!(rows[0].distance, "5K");
        assert_eq!(rows[0].km, "5");
        assert_eq!(rows[3].km, "21.0975");
        assert_eq!(rows[4].miles, "26.219");
    }
}
