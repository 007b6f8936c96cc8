//! Per-provider request shapes and response schemas.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Deserialize;
use url::Url;

use super::{HttpRequest, Provider, ProviderError, ProviderResponse};

const ZEROBOUNCE_URL: &str = "https://api.zerobounce.net/v2/validate";
const MAILGUN_URL: &str = "https://api.mailgun.net/v4/address/validate";
const HUNTER_URL: &str = "https://api.hunter.io/v2/email-verifier";

/// One adapter per provider: build the single outbound request, then map the
/// provider's body into a [`ProviderResponse`].
pub(crate) trait ProviderSchema: Send + Sync {
    fn provider(&self) -> Provider;
    fn request(&self, email: &str, api_key: &str) -> Result<HttpRequest, ProviderError>;
    fn interpret(&self, body: &[u8]) -> Result<ProviderResponse, ProviderError>;
}

pub(crate) fn schema_for(provider: Provider) -> &'static dyn ProviderSchema {
    match provider {
        Provider::ZeroBounce => &ZeroBounce,
        Provider::Mailgun => &Mailgun,
        Provider::Hunter => &Hunter,
    }
}

fn build_url<'a, I>(provider: Provider, base: &str, params: I) -> Result<String, ProviderError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    Url::parse_with_params(base, params)
        .map(String::from)
        .map_err(|source| ProviderError::invalid_request(provider, source))
}

fn decode<'de, T: Deserialize<'de>>(provider: Provider, body: &'de [u8]) -> Result<T, ProviderError> {
    serde_json::from_slice(body).map_err(|source| ProviderError::decode(provider, source))
}

fn verdict(provider: Provider, is_valid: bool) -> ProviderResponse {
    ProviderResponse {
        is_valid,
        is_deliverable: None,
        is_disposable: None,
        is_catch_all: None,
        confidence: None,
        provider: Some(provider),
        error: None,
    }
}

// ZeroBounce: api_key en query, verdict dans `status` / `sub_status`.

pub(crate) struct ZeroBounce;

#[derive(Debug, Deserialize)]
struct ZeroBounceBody {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    sub_status: Option<String>,
}

/// Fixed confidence per ZeroBounce `status`; unknown statuses score 0.
pub(crate) fn zerobounce_confidence(status: &str) -> f64 {
    match status {
        "valid" => 100.0,
        "catch-all" => 50.0,
        "unknown" => 25.0,
        "invalid" | "spamtrap" | "abuse" | "do_not_mail" => 0.0,
        _ => 0.0,
    }
}

impl ProviderSchema for ZeroBounce {
    fn provider(&self) -> Provider {
        Provider::ZeroBounce
    }

    fn request(&self, email: &str, api_key: &str) -> Result<HttpRequest, ProviderError> {
        let url = build_url(
            self.provider(),
            ZEROBOUNCE_URL,
            [("api_key", api_key), ("email", email)],
        )?;
        Ok(HttpRequest::get(url))
    }

    fn interpret(&self, body: &[u8]) -> Result<ProviderResponse, ProviderError> {
        let body: ZeroBounceBody = decode(self.provider(), body)?;
        let status = body.status.as_deref().unwrap_or_default();
        let valid = status == "valid";
        let sub_status = body.sub_status.as_deref();
        Ok(ProviderResponse {
            is_deliverable: Some(valid),
            is_disposable: Some(sub_status == Some("disposable_email")),
            is_catch_all: Some(sub_status == Some("catch_all")),
            confidence: Some(zerobounce_confidence(status)),
            ..verdict(self.provider(), valid)
        })
    }
}

// Mailgun: basic auth `api:<key>`, champs repris tels quels.

pub(crate) struct Mailgun;

#[derive(Debug, Deserialize)]
struct MailgunBody {
    #[serde(default)]
    is_valid: Option<bool>,
    #[serde(default)]
    is_deliverable: Option<bool>,
    #[serde(default)]
    is_disposable_address: Option<bool>,
    #[serde(default)]
    confidence: Option<f64>,
}

impl ProviderSchema for Mailgun {
    fn provider(&self) -> Provider {
        Provider::Mailgun
    }

    fn request(&self, email: &str, api_key: &str) -> Result<HttpRequest, ProviderError> {
        let url = build_url(self.provider(), MAILGUN_URL, [("address", email)])?;
        let credentials = BASE64.encode(format!("api:{api_key}"));
        Ok(HttpRequest::get(url).with_header("Authorization", format!("Basic {credentials}")))
    }

    fn interpret(&self, body: &[u8]) -> Result<ProviderResponse, ProviderError> {
        let body: MailgunBody = decode(self.provider(), body)?;
        Ok(ProviderResponse {
            is_deliverable: body.is_deliverable,
            is_disposable: body.is_disposable_address,
            confidence: body.confidence,
            ..verdict(self.provider(), body.is_valid.unwrap_or(false))
        })
    }
}

// Hunter: api_key en query, charge utile sous `data`.

pub(crate) struct Hunter;

#[derive(Debug, Deserialize)]
struct HunterEnvelope {
    data: HunterData,
}

#[derive(Debug, Deserialize)]
struct HunterData {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    disposable: Option<bool>,
    #[serde(default)]
    confidence: Option<f64>,
}

impl ProviderSchema for Hunter {
    fn provider(&self) -> Provider {
        Provider::Hunter
    }

    fn request(&self, email: &str, api_key: &str) -> Result<HttpRequest, ProviderError> {
        let url = build_url(
            self.provider(),
            HUNTER_URL,
            [("email", email), ("api_key", api_key)],
        )?;
        Ok(HttpRequest::get(url))
    }

    fn interpret(&self, body: &[u8]) -> Result<ProviderResponse, ProviderError> {
        let HunterEnvelope { data } = decode(self.provider(), body)?;
        let valid = data.status.as_deref() == Some("valid");
        Ok(ProviderResponse {
            is_deliverable: Some(valid),
            is_disposable: data.disposable,
            confidence: data.confidence,
            ..verdict(self.provider(), valid)
        })
    }
}
