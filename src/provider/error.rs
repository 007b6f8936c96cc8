use std::time::Duration;

use thiserror::Error;

use super::{Provider, TransportError};

/// Reasons a provider call produced no usable verdict.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{provider} API error: {status}")]
    Api { provider: Provider, status: u16 },
    #[error("{provider} request failed: {source}")]
    Transport {
        provider: Provider,
        #[source]
        source: TransportError,
    },
    #[error("{provider} request timed out after {}ms", .elapsed.as_millis())]
    Timeout { provider: Provider, elapsed: Duration },
    #[error("{provider} returned an unreadable response: {source}")]
    Decode {
        provider: Provider,
        #[source]
        source: serde_json::Error,
    },
    #[error("{provider} request could not be built: {source}")]
    InvalidRequest {
        provider: Provider,
        #[source]
        source: url::ParseError,
    },
    #[error("Unsupported API provider: {0}")]
    Unsupported(String),
}

impl ProviderError {
    pub(crate) fn transport(provider: Provider, source: TransportError) -> Self {
        Self::Transport { provider, source }
    }

    pub(crate) fn timeout(provider: Provider, elapsed: Duration) -> Self {
        Self::Timeout { provider, elapsed }
    }

    pub(crate) fn decode(provider: Provider, source: serde_json::Error) -> Self {
        Self::Decode { provider, source }
    }

    pub(crate) fn invalid_request(provider: Provider, source: url::ParseError) -> Self {
        Self::InvalidRequest { provider, source }
    }
}
