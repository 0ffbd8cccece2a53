//! Error types for the payroll aggregation engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Only configuration and source loading can fail: the filter, aggregation
//! and statistics engines degrade noisy data to fallbacks instead of
//! returning errors.

use thiserror::Error;

/// The main error type for the payroll aggregation engine.
///
/// # Example
///
/// ```
/// use folha_engine::error::EngineError;
///
/// let error = EngineError::SourceNotFound {
///     name: "2025-04.json".to_string(),
/// };
/// assert_eq!(error.to_string(), "Source file not found: 2025-04.json");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The source file does not exist.
    #[error("Source file not found: {name}")]
    SourceNotFound {
        /// The source file name.
        name: String,
    },

    /// The source could not be reached; the fetch may succeed if retried.
    #[error("Source '{name}' is unavailable: {message}")]
    SourceUnavailable {
        /// The source file name.
        name: String,
        /// A description of the failure.
        message: String,
    },

    /// The source answered with a non-retryable status.
    #[error("Source '{name}' rejected the request with status {status}")]
    SourceRejected {
        /// The source file name.
        name: String,
        /// The HTTP status returned.
        status: u16,
    },

    /// The source file is not valid JSON.
    #[error("Failed to parse source file '{name}': {message}")]
    SourceParseError {
        /// The source file name.
        name: String,
        /// A description of the parse error.
        message: String,
    },

    /// The source file is JSON but carries no record array.
    #[error("Source file '{name}' has an unsupported shape: {message}")]
    InvalidSourceShape {
        /// The source file name.
        name: String,
        /// What was expected.
        message: String,
    },

    /// Every retry attempt failed.
    #[error("Source '{name}' failed after {attempts} attempts: {message}")]
    FetchExhausted {
        /// The source file name.
        name: String,
        /// How many attempts were made.
        attempts: u32,
        /// The last failure.
        message: String,
    },

    /// A competência string is not in `YYYY-MM` form.
    #[error("Invalid competência: {value}")]
    InvalidCompetencia {
        /// The rejected value.
        value: String,
    },
}

impl EngineError {
    /// Returns true if retrying the operation may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, EngineError::SourceUnavailable { .. })
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/dashboard.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/dashboard.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_source_parse_error_displays_name_and_message() {
        let error = EngineError::SourceParseError {
            name: "2025-04.json".to_string(),
            message: "expected value at line 1 column 1".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse source file '2025-04.json': expected value at line 1 column 1"
        );
    }

    #[test]
    fn test_fetch_exhausted_displays_attempts() {
        let error = EngineError::FetchExhausted {
            name: "2025-04.json".to_string(),
            attempts: 3,
            message: "connection reset".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Source '2025-04.json' failed after 3 attempts: connection reset"
        );
    }

    #[test]
    fn test_source_rejected_displays_status() {
        let error = EngineError::SourceRejected {
            name: "2025-04.json".to_string(),
            status: 403,
        };
        assert_eq!(
            error.to_string(),
            "Source '2025-04.json' rejected the request with status 403"
        );
    }

    #[test]
    fn test_invalid_competencia_displays_value() {
        let error = EngineError::InvalidCompetencia {
            value: "2025/04".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid competência: 2025/04");
    }

    #[test]
    fn test_only_unavailable_is_transient() {
        let unavailable = EngineError::SourceUnavailable {
            name: "a.json".to_string(),
            message: "timeout".to_string(),
        };
        let not_found = EngineError::SourceNotFound {
            name: "a.json".to_string(),
        };
        let parse = EngineError::SourceParseError {
            name: "a.json".to_string(),
            message: "eof".to_string(),
        };
        assert!(unavailable.is_transient());
        assert!(!not_found.is_transient());
        assert!(!parse.is_transient());
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_not_found() -> EngineResult<()> {
            Err(EngineError::SourceNotFound {
                name: "missing.json".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
