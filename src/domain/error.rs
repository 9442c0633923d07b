use serde::{Deserialize, Serialize};
use std::fmt;

use super::import::AttemptFailure;

/// Failure of the import resolver. Every variant carries enough context for
/// the caller to render a message verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ImportError {
    /// No encoding/delimiter/header combination produced a valid table.
    Unparseable {
        byte_len: usize,
        attempts: Vec<AttemptFailure>,
    },
    /// A header was found but no data rows follow it.
    EmptyAfterHeader { columns: Vec<String> },
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::Unparseable { byte_len, attempts } => write!(
                f,
                "Could not parse this file ({} bytes, {} parse strategies tried). \
                 Please re-export it as a CSV from GA4 or Search Console.",
                byte_len,
                attempts.len()
            ),
            ImportError::EmptyAfterHeader { columns } => write!(
                f,
                "The file has a header ({}) but no data rows.",
                columns.join(", ")
            ),
        }
    }
}

impl std::error::Error for ImportError {}

#[derive(Debug, Serialize, Deserialize)]
pub enum AppError {
    Internal(String),
    ValidationError(String),
    ConfigError(String),
    Import(ImportError),
    LLMError(String),
    IoError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AppError::ConfigError(msg) => write!(f, "Config error: {}", msg),
            AppError::Import(err) => write!(f, "{}", err),
            AppError::LLMError(msg) => write!(f, "LLM error: {}", msg),
            AppError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

impl From<ImportError> for AppError {
    fn from(err: ImportError) -> Self {
        AppError::Import(err)
    }
}

impl From<figment::Error> for AppError {
    fn from(err: figment::Error) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::import::{Delimiter, ParseAttempt, TextEncoding};

    #[test]
    fn test_unparseable_message_mentions_size_and_attempts() {
        let err = ImportError::Unparseable {
            byte_len: 3,
            attempts: vec![AttemptFailure {
                attempt: ParseAttempt::new(TextEncoding::Utf8, Delimiter::Comma),
                reason: "no line contains the delimiter".to_string(),
            }],
        };

        let message = err.to_string();
        assert!(message.contains("3 bytes"));
        assert!(message.contains("1 parse strategies"));
        assert!(message.contains("re-export"));
    }

    #[test]
    fn test_import_error_passes_through_app_error() {
        let err: AppError = ImportError::EmptyAfterHeader {
            columns: vec!["query".to_string(), "clicks".to_string()],
        }
        .into();

        assert_eq!(
            err.to_string(),
            "The file has a header (query, clicks) but no data rows."
        );
    }
}
