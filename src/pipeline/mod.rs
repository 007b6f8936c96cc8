//! The validation pipeline: format, then domain, then deliverability.
//!
//! A format failure stops the pipeline. A domain or provider failure marks the
//! result invalid but lets the later stages run, so the caller sees every
//! problem at once. [`EmailValidator::validate`] never panics outward.

mod options;
mod types;

pub use options::{ConfigError, ValidatorOptions};
pub use types::{BatchSummary, BatchValidationResult, ValidationDetails, ValidationResult};

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;

use crate::dns::{self, LookupRecords};
use crate::provider::{ApiValidator, HttpTransport, ReqwestTransport};
use crate::util::panic_message;
use crate::validator::{self, ValidationMode};

const DNS_FALLBACK_ERROR: &str = "Domain does not exist or cannot receive emails";
const DELIVERABILITY_FALLBACK_ERROR: &str = "Email is not deliverable";
const NO_MX_WARNING: &str = "Domain has no MX records but may still receive emails";
const DISPOSABLE_WARNING: &str = "Email appears to be from a disposable email service";
const CATCH_ALL_WARNING: &str = "Domain appears to be a catch-all domain";

/// External collaborators the pipeline talks to. `None` means unavailable.
#[derive(Clone, Default)]
pub struct Collaborators {
    pub resolver: Option<Arc<dyn LookupRecords>>,
    pub transport: Option<Arc<dyn HttpTransport>>,
}

pub struct EmailValidator {
    options: ValidatorOptions,
    resolver: Option<Arc<dyn LookupRecords>>,
    api: Option<ApiValidator>,
}

impl std::fmt::Debug for EmailValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailValidator")
            .field("check_format", &self.options.check_format)
            .field("check_dns", &self.options.check_dns)
            .field("check_mx", &self.options.check_mx)
            .field("check_deliverability", &self.options.check_deliverability)
            .field("api", &self.api)
            .finish()
    }
}

impl EmailValidator {
    /// Builds a validator backed by the system resolver and a reqwest client.
    pub fn new(options: ValidatorOptions) -> Result<Self, ConfigError> {
        options.validate()?;

        let resolver = if options.needs_resolver() {
            match dns::system_resolver() {
                Ok(resolver) => Some(Arc::new(resolver) as Arc<dyn LookupRecords>),
                Err(err) => {
                    tracing::debug!(error = %err, "system resolver unavailable");
                    None
                }
            }
        } else {
            None
        };

        let transport = if options.check_deliverability {
            Some(Arc::new(ReqwestTransport::new()?) as Arc<dyn HttpTransport>)
        } else {
            None
        };

        Self::with_collaborators(options, Collaborators { resolver, transport })
    }

    /// Builds a validator over injected collaborators.
    ///
    /// Without a resolver, DNS and MX checks are switched off with a warning
    /// instead of failing.
    pub fn with_collaborators(
        mut options: ValidatorOptions,
        collaborators: Collaborators,
    ) -> Result<Self, ConfigError> {
        options.validate()?;

        let resolver = if options.needs_resolver() {
            if collaborators.resolver.is_none() {
                tracing::warn!("DNS/MX validation is not supported in this environment; disabling it");
                options.check_dns = false;
                options.check_mx = false;
            }
            collaborators.resolver
        } else {
            None
        };

        let api = if options.check_deliverability {
            let transport = collaborators
                .transport
                .ok_or(ConfigError::TransportUnavailable)?;
            Some(ApiValidator::new(
                options.provider,
                options.api_key.clone(),
                options.timeout,
                transport,
            ))
        } else {
            None
        };

        Ok(Self {
            options,
            resolver,
            api,
        })
    }

    /// Effective options, after any downgrade applied at construction.
    pub fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    pub async fn validate(&self, email: &str) -> ValidationResult {
        let mut result = ValidationResult::new(email);
        let run = AssertUnwindSafe(self.run_stages(email, &mut result))
            .catch_unwind()
            .await;
        if let Err(payload) = run {
            let message = panic_message(payload.as_ref());
            tracing::error!(error = %message, "validation pipeline panicked");
            result.reject(message);
        }
        result
    }

    async fn run_stages(&self, email: &str, result: &mut ValidationResult) {
        if self.options.check_format {
            let format = validator::format_report(email, self.options.format_mode);
            let error = format.error.clone();
            let ok = format.is_valid;
            result.details.format = Some(format);
            if !ok {
                result.reject(error.unwrap_or_else(|| "Invalid email format".to_string()));
                return;
            }
        }

        if let Some(resolver) = self.resolver.as_deref() {
            let domain = email.split('@').nth(1).unwrap_or_default();
            let report = dns::check_domain_with(resolver, domain, self.options.timeout).await;
            if !report.is_valid {
                result.reject(report.error.clone().unwrap_or_else(|| DNS_FALLBACK_ERROR.to_string()));
            } else if self.options.check_mx && !report.has_mx() {
                result.warn(NO_MX_WARNING);
            }
            result.details.dns = Some(report);
        }

        if let Some(api) = &self.api {
            let response = api.validate(email).await;
            if !response.is_valid {
                result.reject(
                    response
                        .error
                        .clone()
                        .unwrap_or_else(|| DELIVERABILITY_FALLBACK_ERROR.to_string()),
                );
            } else {
                if response.disposable() {
                    result.warn(DISPOSABLE_WARNING);
                }
                if response.catch_all() {
                    result.warn(CATCH_ALL_WARNING);
                }
            }
            result.details.deliverability = Some(response);
        }

        tracing::debug!(
            valid = result.is_valid,
            stages = ?result.details.executed(),
            "validation finished"
        );
    }

    /// Validates each address in turn. A panicking address yields an invalid
    /// result and is counted as failed; the batch keeps going.
    pub async fn validate_batch<I, S>(&self, emails: I) -> BatchValidationResult
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut results = Vec::new();
        let mut processed = 0;
        let mut failed = 0;

        for email in emails {
            let email = email.as_ref();
            match AssertUnwindSafe(self.validate(email)).catch_unwind().await {
                Ok(result) => {
                    processed += 1;
                    results.push(result);
                }
                Err(payload) => {
                    failed += 1;
                    results.push(ValidationResult::aborted(email, panic_message(payload.as_ref())));
                }
            }
        }

        BatchValidationResult::new(results, processed, failed)
    }

    /// Runs a validator built from `options` and keeps only the verdict.
    pub async fn is_valid(email: &str, options: ValidatorOptions) -> Result<bool, ConfigError> {
        let validator = Self::new(options)?;
        Ok(validator.validate(email).await.is_valid)
    }

    pub fn validate_format(email: &str, mode: ValidationMode) -> bool {
        validator::check_format(email, mode).is_ok()
    }

    pub async fn validate_domain(domain: &str, timeout: Duration) -> bool {
        dns::check_domain(domain, timeout).await.is_valid
    }
}

#[cfg(test)]
mod tests;
