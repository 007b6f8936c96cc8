use std::time::Duration;

use thiserror::Error;

use crate::dns::DEFAULT_DNS_TIMEOUT;
use crate::provider::{Provider, TransportError};
use crate::validator::ValidationMode;

/// Errors raised while building an [`EmailValidator`](super::EmailValidator).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("API key is required for deliverability checking")]
    MissingApiKey,
    #[error("deliverability checking requires an HTTP transport")]
    TransportUnavailable,
    #[error("HTTP transport initialization failed: {0}")]
    Transport(#[from] TransportError),
}

/// Which stages run and how. Defaults: format on, everything else off,
/// [`Provider::ZeroBounce`], no API key, 5000ms timeout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorOptions {
    pub check_format: bool,
    pub check_dns: bool,
    pub check_mx: bool,
    pub check_deliverability: bool,
    pub format_mode: ValidationMode,
    pub provider: Provider,
    pub api_key: String,
    /// Deadline for the DNS lookups and for each provider request.
    pub timeout: Duration,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            check_format: true,
            check_dns: false,
            check_mx: false,
            check_deliverability: false,
            format_mode: ValidationMode::default(),
            provider: Provider::default(),
            api_key: String::new(),
            timeout: DEFAULT_DNS_TIMEOUT,
        }
    }
}

impl ValidatorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_format(mut self, value: bool) -> Self {
        self.check_format = value;
        self
    }

    pub fn with_dns(mut self, value: bool) -> Self {
        self.check_dns = value;
        self
    }

    pub fn with_mx(mut self, value: bool) -> Self {
        self.check_mx = value;
        self
    }

    pub fn with_deliverability(mut self, value: bool) -> Self {
        self.check_deliverability = value;
        self
    }

    pub fn with_format_mode(mut self, mode: ValidationMode) -> Self {
        self.format_mode = mode;
        self
    }

    pub fn with_provider(mut self, provider: Provider) -> Self {
        self.provider = provider;
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn needs_resolver(&self) -> bool {
        self.check_dns || self.check_mx
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.check_deliverability && self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_enable_format_only() {
        let o = ValidatorOptions::default();
        assert!(o.check_format);
        assert!(!o.check_dns && !o.check_mx && !o.check_deliverability);
        assert_eq!(o.provider, Provider::ZeroBounce);
        assert!(o.api_key.is_empty());
        assert_eq!(o.timeout, Duration::from_millis(5_000));
        assert_eq!(o.format_mode, ValidationMode::Relaxed);
    }

    #[test]
    fn deliverability_requires_key() {
        let o = ValidatorOptions::new().with_deliverability(true);
        assert!(matches!(o.validate(), Err(ConfigError::MissingApiKey)));
        let o = o.with_api_key("   ");
        assert!(matches!(o.validate(), Err(ConfigError::MissingApiKey)));
        let o = o.with_api_key("k");
        assert!(o.validate().is_ok());
    }
}
