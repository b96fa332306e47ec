// Library interface for GoPace modules
// Integration tests and benchmarks link against this crate

pub mod calculator;
pub mod config;
pub mod conversion;
pub mod distances;
pub mod error;
pub mod export;
pub mod guidance;
pub mod logging;
pub mod models;
pub mod riegel;
pub mod splits;
pub mod vdot;

// Re-export commonly used types for convenience
pub use models::*;
pub use distances::{find_distance, race_distances, RaceDistance};
pub use splits::{generate_splits, SplitSchedule, SplitSegment};
pub use vdot::{VdotDistance, VdotTable};
pub use export::OutputFormat;
pub use error::{CalculationError, GoPaceError, Result};
pub use logging::{LogConfig, LogFormat, LogLevel};
