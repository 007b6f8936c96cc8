use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ProviderError;

/// Third-party deliverability services the adapter knows how to call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    ZeroBounce,
    Mailgun,
    Hunter,
}

impl Provider {
    pub const ALL: [Provider; 3] = [Self::ZeroBounce, Self::Mailgun, Self::Hunter];

    /// Identifier used in configuration and serialized output.
    pub fn id(&self) -> &'static str {
        match self {
            Self::ZeroBounce => "zerobounce",
            Self::Mailgun => "mailgun",
            Self::Hunter => "hunter",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ZeroBounce => "ZeroBounce",
            Self::Mailgun => "Mailgun",
            Self::Hunter => "Hunter",
        })
    }
}

impl FromStr for Provider {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|provider| provider.id().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ProviderError::Unsupported(s.to_string()))
    }
}

/// Normalized verdict every provider adapter produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderResponse {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_deliverable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_disposable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_catch_all: Option<bool>,
    /// 0–100, or the provider's native scale when it reports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<Provider>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProviderResponse {
    pub(crate) fn failure(provider: Option<Provider>, error: &ProviderError) -> Self {
        Self {
            is_valid: false,
            is_deliverable: None,
            is_disposable: None,
            is_catch_all: None,
            confidence: None,
            provider,
            error: Some(error.to_string()),
        }
    }

    pub fn disposable(&self) -> bool {
        self.is_disposable.unwrap_or(false)
    }

    pub fn catch_all(&self) -> bool {
        self.is_catch_all.unwrap_or(false)
    }
}
