//! Third-party deliverability scoring.
//!
//! [`ApiValidator`] sends one request per address to the selected
//! [`Provider`] and normalizes the reply into a [`ProviderResponse`]. It never
//! returns an error: HTTP failures, timeouts and unreadable bodies all become
//! an invalid response carrying a message that names the provider.

mod error;
mod schema;
mod transport;
mod types;

pub use error::ProviderError;
pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, TransportError};
pub use types::{Provider, ProviderResponse};

use std::sync::Arc;
use std::time::Duration;

use schema::schema_for;

pub const DEFAULT_API_TIMEOUT: Duration = Duration::from_millis(10_000);
/// Pause between two calls of [`ApiValidator::validate_batch`].
pub const DEFAULT_BATCH_DELAY: Duration = Duration::from_millis(100);

#[derive(Debug, Clone)]
enum Selection {
    Known(Provider),
    Unsupported(String),
}

#[derive(Clone)]
pub struct ApiValidator {
    selection: Selection,
    api_key: String,
    timeout: Duration,
    batch_delay: Duration,
    transport: Arc<dyn HttpTransport>,
}

impl std::fmt::Debug for ApiValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiValidator")
            .field("selection", &self.selection)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("batch_delay", &self.batch_delay)
            .finish()
    }
}

impl ApiValidator {
    pub fn new(
        provider: Provider,
        api_key: impl Into<String>,
        timeout: Duration,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            selection: Selection::Known(provider),
            api_key: api_key.into(),
            timeout,
            batch_delay: DEFAULT_BATCH_DELAY,
            transport,
        }
    }

    /// Builds a validator from a textual provider identifier. An unknown
    /// identifier is not rejected here: every `validate` call reports it.
    pub fn from_name(
        name: &str,
        api_key: impl Into<String>,
        timeout: Duration,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        let selection = match name.parse::<Provider>() {
            Ok(provider) => Selection::Known(provider),
            Err(_) => Selection::Unsupported(name.to_string()),
        };
        Self {
            selection,
            ..Self::new(Provider::default(), api_key, timeout, transport)
        }
    }

    pub fn with_batch_delay(mut self, delay: Duration) -> Self {
        self.batch_delay = delay;
        self
    }

    pub fn provider(&self) -> Option<Provider> {
        match self.selection {
            Selection::Known(provider) => Some(provider),
            Selection::Unsupported(_) => None,
        }
    }

    pub async fn validate(&self, email: &str) -> ProviderResponse {
        let provider = match &self.selection {
            Selection::Known(provider) => *provider,
            Selection::Unsupported(name) => {
                return ProviderResponse::failure(None, &ProviderError::Unsupported(name.clone()));
            }
        };

        match self.call(provider, email).await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(%provider, error = %err, "deliverability check failed");
                ProviderResponse::failure(Some(provider), &err)
            }
        }
    }

    async fn call(&self, provider: Provider, email: &str) -> Result<ProviderResponse, ProviderError> {
        let schema = schema_for(provider);
        let request = schema.request(email, &self.api_key)?;

        // Sur timeout le futur est abandonné, ce qui annule la requête.
        let response = tokio::time::timeout(self.timeout, self.transport.send(request))
            .await
            .map_err(|_| ProviderError::timeout(provider, self.timeout))?
            .map_err(|source| ProviderError::transport(provider, source))?;

        if !response.is_success() {
            return Err(ProviderError::Api {
                provider,
                status: response.status,
            });
        }

        tracing::debug!(%provider, status = response.status, "provider replied");
        schema.interpret(&response.body)
    }

    /// Validates the addresses one after another, pausing between requests.
    pub async fn validate_batch<I, S>(&self, emails: I) -> Vec<ProviderResponse>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut results = Vec::new();
        for email in emails {
            if !results.is_empty() && !self.batch_delay.is_zero() {
                tokio::time::sleep(self.batch_delay).await;
            }
            results.push(self.validate(email.as_ref()).await);
        }
        results
    }
}
