use serde::{Deserialize, Serialize};

use crate::dns::DomainReport;
use crate::provider::ProviderResponse;
use crate::validator::FormatReport;

/// Per-stage outcomes; a slot is `None` when its stage did not run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<FormatReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns: Option<DomainReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deliverability: Option<ProviderResponse>,
}

impl ValidationDetails {
    /// Names of the stages that ran, in pipeline order.
    pub fn executed(&self) -> Vec<&'static str> {
        let mut stages = Vec::new();
        if self.format.is_some() {
            stages.push("format");
        }
        if self.dns.is_some() {
            stages.push("dns");
        }
        if self.deliverability.is_some() {
            stages.push("deliverability");
        }
        stages
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub email: String,
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub details: ValidationDetails,
}

impl ValidationResult {
    pub(crate) fn new(email: &str) -> Self {
        Self {
            email: email.to_string(),
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            details: ValidationDetails::default(),
        }
    }

    /// Result for an address whose validation aborted before producing details.
    pub(crate) fn aborted(email: &str, error: String) -> Self {
        let mut result = Self::new(email);
        result.reject(error);
        result
    }

    pub(crate) fn reject(&mut self, error: impl Into<String>) {
        self.is_valid = false;
        self.errors.push(error.into());
    }

    pub(crate) fn warn(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    /// Addresses whose validation ran to completion.
    pub processed: usize,
    /// Addresses whose validation panicked and were replaced by an invalid result.
    pub failed: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchValidationResult {
    pub results: Vec<ValidationResult>,
    pub summary: BatchSummary,
}

impl BatchValidationResult {
    pub(crate) fn new(results: Vec<ValidationResult>, processed: usize, failed: usize) -> Self {
        let valid = results.iter().filter(|r| r.is_valid).count();
        let summary = BatchSummary {
            total: results.len(),
            valid,
            invalid: results.len() - valid,
            processed,
            failed,
        };
        Self { results, summary }
    }
}
