//! Unified error hierarchy for GoPace
//!
//! Expected edge cases (zero times, zero distances, short split counts) are
//! reported through sentinels such as `None` or an empty schedule. The types
//! here cover the conditions a caller has to act on: unsupported distances,
//! malformed reference tables, bad configuration and output failures.

use thiserror::Error;

/// Top-level error type for all GoPace operations
#[derive(Debug, Error)]
pub enum GoPaceError {
    /// Prediction and conversion errors
    #[error("Calculation error: {0}")]
    Calculation(#[from] CalculationError),

    /// Distance label not present in the registry
    #[error("Unknown race distance: {label}")]
    UnknownDistance { label: String },

    /// Malformed user input at the CLI/config boundary
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Rendering results to JSON/CSV failed
    #[error("Export error: {0}")]
    Export(String),
}

/// Calculation errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CalculationError {
    /// Distance has no VDOT reference category
    #[error("Unsupported distance for {calculation}: {label}")]
    UnsupportedDistance { calculation: String, label: String },

    /// Reference table violates its ordering invariants
    #[error("Invalid reference table: {reason}")]
    InvalidTable { reason: String },

    /// Invalid parameter
    #[error("Invalid parameter for {calculation}: {parameter}={value}")]
    InvalidParameter {
        calculation: String,
        parameter: String,
        value: String,
    },
}

/// Result type alias for GoPace operations
pub type Result<T> = std::result::Result<T, GoPaceError>;

impl GoPaceError {
    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            GoPaceError::UnknownDistance { .. } => ErrorSeverity::Warning,
            GoPaceError::InvalidInput(_) => ErrorSeverity::Warning,
            GoPaceError::Calculation(CalculationError::UnsupportedDistance { .. }) => {
                ErrorSeverity::Warning
            }
            GoPaceError::Calculation(CalculationError::InvalidTable { .. }) => {
                ErrorSeverity::Critical
            }
            _ => ErrorSeverity::Error,
        }
    }

    /// Emit a tracing event at the level matching [`Self::severity`]
    pub fn log(&self) {
        let severity = self.severity();
        if severity.to_tracing_level() == tracing::Level::ERROR {
            tracing::error!(severity = ?severity, error = %self, "Command failed");
        } else {
            tracing::warn!(severity = ?severity, error = %self, "Command failed");
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            GoPaceError::UnknownDistance { label } => {
                format!(
                    "'{}' is not a known race distance. Run `gopace distances` to list them.",
                    label
                )
            }
            GoPaceError::Calculation(CalculationError::UnsupportedDistance { label, .. }) => {
                format!(
                    "VDOT predictions are only available for 5K, 10K, 15K, Half Marathon and Marathon (got {}).",
                    label
                )
            }
            GoPaceError::Configuration(reason) => {
                format!("Configuration problem: {}. Check your config file.", reason)
            }
            _ => self.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Critical error, authored data is broken
    Critical,
    /// Error that prevents the operation
    Error,
    /// Warning that doesn't prevent operation
    Warning,
}

impl ErrorSeverity {
    /// Convert to tracing level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            ErrorSeverity::Critical => tracing::Level::ERROR,
            ErrorSeverity::Error => tracing::Level::ERROR,
            ErrorSeverity::Warning => tracing::Level::WARN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_severity() {
        let err = GoPaceError::UnknownDistance {
            label: "50K".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Warning);

        let err = GoPaceError::Calculation(CalculationError::InvalidTable {
            reason: "empty".to_string(),
        });
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.severity().to_tracing_level(), tracing::Level::ERROR);
    }

    #[test]
    fn test_user_messages() {
        let err = GoPaceError::UnknownDistance {
            label: "Ultra".to_string(),
        };
        assert!(err.user_message().contains("gopace distances"));

        let err: GoPaceError = CalculationError::UnsupportedDistance {
            calculation: "vdot".to_string(),
            label: "1 Mile".to_string(),
        }
        .into();
        assert!(err.user_message().contains("1 Mile"));
    }

    #[test]
    fn test_severity_levels() {
        let warning = GoPaceError::InvalidInput("bias".to_string());
        assert_eq!(warning.severity().to_tracing_level(), tracing::Level::WARN);

        let failure = GoPaceError::Export("broken pipe".to_string());
        assert_eq!(failure.severity(), ErrorSeverity::Error);
        assert_eq!(failure.severity().to_tracing_level(), tracing::Level::ERROR);

        // No subscriber installed; logging must still be a no-op
        warning.log();
        failure.log();
    }
}
