use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which structural pattern the final format rule applies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// `[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}` only.
    Strict,
    /// RFC 5322 derived atext local part and LDH domain labels.
    #[default]
    Relaxed,
}

/// Outcome of the format stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatReport {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FormatReport {
    pub(crate) fn valid() -> Self {
        Self {
            is_valid: true,
            error: None,
        }
    }

    pub(crate) fn invalid(error: &FormatError) -> Self {
        Self {
            is_valid: false,
            error: Some(error.to_string()),
        }
    }
}

impl From<Result<(), FormatError>> for FormatReport {
    fn from(outcome: Result<(), FormatError>) -> Self {
        match outcome {
            Ok(()) => Self::valid(),
            Err(err) => Self::invalid(&err),
        }
    }
}

/// One entry of [`format_report_batch`](crate::validator::format_report_batch).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatBatchEntry {
    pub email: String,
    #[serde(flatten)]
    pub report: FormatReport,
}

/// The first format rule an address violates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("Email must be a non-empty string")]
    Empty,
    #[error("Email exceeds maximum length of 254 characters")]
    TooLong { length: usize },
    #[error("Email must contain exactly one @ symbol")]
    AtSignCount { found: usize },
    #[error("Local part must be between 1 and 64 characters")]
    LocalLength { length: usize },
    #[error("Domain part must be between 1 and 253 characters")]
    DomainLength { length: usize },
    #[error("Email cannot contain consecutive dots")]
    ConsecutiveDots,
    #[error("Local part cannot start or end with a dot")]
    LocalDotEdge,
    #[error("Email format is invalid")]
    Pattern { mode: ValidationMode },
}
