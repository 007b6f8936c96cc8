use std::net::Ipv4Addr;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use async_trait::async_trait;

use super::{Collaborators, ConfigError, EmailValidator, ValidatorOptions};
use crate::dns::{LookupRecords, MxRecord};
use crate::dns::tests::StubResolver;
use crate::provider::tests::StubTransport;
use crate::provider::{HttpRequest, HttpResponse, HttpTransport, Provider, TransportError};
use crate::validator::ValidationMode;

fn with(
    options: ValidatorOptions,
    resolver: Option<StubResolver>,
    transport: Option<StubTransport>,
) -> EmailValidator {
    let collaborators = Collaborators {
        resolver: resolver.map(|r| Arc::new(r) as Arc<dyn LookupRecords>),
        transport: transport.map(|t| Arc::new(t) as Arc<dyn HttpTransport>),
    };
    EmailValidator::with_collaborators(options, collaborators).expect("valid configuration")
}

fn deliverability() -> ValidatorOptions {
    ValidatorOptions::new()
        .with_deliverability(true)
        .with_api_key("test-api-key")
}

#[tokio::test]
async fn valid_address_with_defaults() {
    let v = with(ValidatorOptions::default(), None, None);
    let r = v.validate("test@example.com").await;
    assert!(r.is_valid);
    assert!(r.errors.is_empty());
    assert!(r.warnings.is_empty());
    assert_eq!(r.details.executed(), ["format"]);
}

#[tokio::test]
async fn invalid_format_short_circuits() {
    let resolver = StubResolver::healthy();
    let calls = resolver.calls.clone();
    let options = deliverability().with_dns(true).with_mx(true);
    let transport = StubTransport::json(200, r#"{"status":"valid"}"#);
    let requests = transport.requests.clone();
    let v = with(options, Some(resolver), Some(transport));

    let r = v.validate("invalid-email").await;
    assert!(!r.is_valid);
    assert_eq!(r.errors, ["Email must contain exactly one @ symbol"]);
    assert_eq!(r.details.executed(), ["format"]);
    assert!(r.details.dns.is_none());
    assert!(r.details.deliverability.is_none());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(requests.lock().map(|r| r.is_empty()).unwrap_or(false));
}

#[tokio::test]
async fn format_only_invalid_has_single_slot() {
    let v = with(ValidatorOptions::default(), None, None);
    let r = v.validate("invalid-email").await;
    assert!(!r.is_valid);
    assert_eq!(r.errors.len(), 1);
    assert_eq!(r.details.executed(), ["format"]);
}

#[tokio::test]
async fn dns_failure_still_runs_deliverability() {
    let options = deliverability().with_dns(true);
    let v = with(
        options,
        Some(StubResolver::failing()),
        Some(StubTransport::json(401, "")),
    );
    let r = v.validate("user@nowhere.example").await;
    assert!(!r.is_valid);
    assert_eq!(
        r.errors,
        [
            "Domain does not exist or cannot receive emails",
            "ZeroBounce API error: 401"
        ]
    );
    assert_eq!(r.details.executed(), ["format", "dns", "deliverability"]);
}

#[tokio::test]
async fn missing_mx_is_a_warning() {
    let resolver = StubResolver::new(|_| Ok(vec![Ipv4Addr::LOCALHOST]), |_| Ok(Vec::new()));
    let v = with(
        ValidatorOptions::new().with_mx(true),
        Some(resolver),
        None,
    );
    let r = v.validate("user@example.com").await;
    assert!(r.is_valid);
    assert_eq!(
        r.warnings,
        ["Domain has no MX records but may still receive emails"]
    );
}

#[tokio::test]
async fn missing_mx_is_silent_without_mx_check() {
    let resolver = StubResolver::new(|_| Ok(vec![Ipv4Addr::LOCALHOST]), |_| Ok(Vec::new()));
    let v = with(ValidatorOptions::new().with_dns(true), Some(resolver), None);
    let r = v.validate("user@example.com").await;
    assert!(r.is_valid);
    assert!(r.warnings.is_empty());
}

#[tokio::test]
async fn dead_domain_skips_mx_warning() {
    let v = with(
        ValidatorOptions::new().with_mx(true),
        Some(StubResolver::failing()),
        None,
    );
    let r = v.validate("user@example.com").await;
    assert!(!r.is_valid);
    assert!(r.warnings.is_empty());
}

#[tokio::test]
async fn domain_lookup_uses_part_after_at() {
    let resolver = StubResolver::new(
        |domain| {
            assert_eq!(domain, "example.org");
            Ok(vec![Ipv4Addr::LOCALHOST])
        },
        |domain| {
            assert_eq!(domain, "example.org");
            Ok(vec![MxRecord::new(10, "mx.example.org")])
        },
    );
    let v = with(ValidatorOptions::new().with_dns(true), Some(resolver), None);
    let r = v.validate("someone@example.org").await;
    assert!(r.is_valid);
    let dns = r.details.dns.expect("dns slot");
    assert_eq!(dns.mx_records, Some(vec!["mx.example.org".to_string()]));
}

#[tokio::test(start_paused = true)]
async fn dns_timeout_is_reported() {
    let v = with(
        ValidatorOptions::new()
            .with_dns(true)
            .with_timeout(Duration::from_millis(100)),
        Some(StubResolver::healthy().with_delay(Duration::from_secs(10))),
        None,
    );
    let r = v.validate("user@example.com").await;
    assert!(!r.is_valid);
    assert!(r.errors[0].contains("timeout"), "{:?}", r.errors);
}

#[tokio::test]
async fn disposable_and_catch_all_warnings() {
    let transport = StubTransport::json(
        200,
        r#"{"status":"valid","sub_status":"disposable_email"}"#,
    );
    let v = with(deliverability(), None, Some(transport));
    let r = v.validate("temp@example.com").await;
    assert!(r.is_valid);
    assert_eq!(
        r.warnings,
        ["Email appears to be from a disposable email service"]
    );

    let transport = StubTransport::json(
        200,
        r#"{"data":{"status":"valid","disposable":true,"confidence":70}}"#,
    );
    let v = with(
        deliverability().with_provider(Provider::Hunter),
        None,
        Some(transport),
    );
    let r = v.validate("temp@example.com").await;
    assert_eq!(
        r.warnings,
        ["Email appears to be from a disposable email service"]
    );
    assert_eq!(
        r.details.deliverability.and_then(|d| d.confidence),
        Some(70.0)
    );
}

#[tokio::test]
async fn catch_all_needs_a_valid_verdict() {
    let transport = StubTransport::json(200, r#"{"status":"catch-all","sub_status":"catch_all"}"#);
    let v = with(deliverability(), None, Some(transport));
    let r = v.validate("who@example.com").await;
    assert!(!r.is_valid);
    assert!(r.warnings.is_empty());
    assert_eq!(r.errors, ["Email is not deliverable"]);
}

#[test]
fn deliverability_without_key_fails_at_construction() {
    let err = EmailValidator::with_collaborators(
        ValidatorOptions::new().with_deliverability(true),
        Collaborators::default(),
    )
    .expect_err("missing key");
    assert!(matches!(err, ConfigError::MissingApiKey));
    assert_eq!(
        err.to_string(),
        "API key is required for deliverability checking"
    );

    let err = EmailValidator::new(ValidatorOptions::new().with_deliverability(true))
        .expect_err("missing key");
    assert!(matches!(err, ConfigError::MissingApiKey));
}

#[test]
fn deliverability_without_transport_fails_at_construction() {
    let err = EmailValidator::with_collaborators(deliverability(), Collaborators::default())
        .expect_err("no transport");
    assert!(matches!(err, ConfigError::TransportUnavailable));
}

#[tokio::test]
async fn missing_resolver_downgrades_dns_checks() {
    let v = with(
        ValidatorOptions::new().with_dns(true).with_mx(true),
        None,
        None,
    );
    assert!(!v.options().check_dns);
    assert!(!v.options().check_mx);
    let r = v.validate("user@example.com").await;
    assert!(r.is_valid);
    assert!(r.details.dns.is_none());
}

struct PanickingTransport;

#[async_trait]
impl HttpTransport for PanickingTransport {
    async fn send(&self, _request: HttpRequest) -> Result<HttpResponse, TransportError> {
        panic!("adapter defect")
    }
}

#[tokio::test]
async fn panicking_stage_becomes_invalid_result() {
    let collaborators = Collaborators {
        resolver: None,
        transport: Some(Arc::new(PanickingTransport)),
    };
    let v = EmailValidator::with_collaborators(deliverability(), collaborators)
        .expect("valid configuration");
    let r = v.validate("user@example.com").await;
    assert!(!r.is_valid);
    assert_eq!(r.errors, ["adapter defect"]);
    assert!(r.details.format.is_some());

    let batch = v.validate_batch(["user@example.com"]).await;
    assert_eq!(batch.summary.processed, 1);
    assert_eq!(batch.summary.failed, 0);
}

#[tokio::test]
async fn batch_keeps_order_and_counts() {
    let v = with(ValidatorOptions::default(), None, None);
    let batch = v
        .validate_batch(["valid@example.com", "invalid-email", "another@test.com"])
        .await;

    let emails: Vec<_> = batch.results.iter().map(|r| r.email.as_str()).collect();
    assert_eq!(emails, ["valid@example.com", "invalid-email", "another@test.com"]);
    assert_eq!(batch.summary.total, 3);
    assert!(batch.summary.valid >= 1);
    assert!(batch.summary.invalid >= 1);
    assert_eq!(batch.summary.processed, 3);
    assert_eq!(batch.summary.failed, 0);

    insta::assert_snapshot!(
        serde_json::to_string(&batch.summary).expect("serializes"),
        @r#"{"total":3,"valid":2,"invalid":1,"processed":3,"failed":0}"#
    );
}

#[tokio::test]
async fn empty_batch() {
    let v = with(ValidatorOptions::default(), None, None);
    let batch = v.validate_batch(Vec::<String>::new()).await;
    assert!(batch.results.is_empty());
    assert_eq!(batch.summary, super::BatchSummary::default());
}

#[tokio::test]
async fn validate_is_idempotent() {
    let options = deliverability().with_dns(true);
    let v = with(
        options,
        Some(StubResolver::healthy()),
        Some(StubTransport::json(
            200,
            r#"{"status":"valid","sub_status":"catch_all"}"#,
        )),
    );
    let first = v.validate("user@example.com").await;
    let second = v.validate("user@example.com").await;
    assert_eq!(first, second);
    assert_eq!(first.warnings, ["Domain appears to be a catch-all domain"]);
}

#[tokio::test]
async fn format_can_be_disabled() {
    let v = with(ValidatorOptions::new().with_format(false), None, None);
    let r = v.validate("not an email").await;
    assert!(r.is_valid);
    assert!(r.details.executed().is_empty());
}

#[tokio::test]
async fn strict_mode_is_honoured() {
    let v = with(
        ValidatorOptions::new().with_format_mode(ValidationMode::Strict),
        None,
        None,
    );
    assert!(!v.validate("user@localhost").await.is_valid);
    let v = with(ValidatorOptions::new(), None, None);
    assert!(v.validate("user@localhost").await.is_valid);
}

#[test]
fn static_format_check() {
    assert!(EmailValidator::validate_format(
        "user@example.com",
        ValidationMode::Relaxed
    ));
    assert!(!EmailValidator::validate_format(
        "user..x@example.com",
        ValidationMode::Strict
    ));
}

#[tokio::test]
async fn static_quick_check() {
    assert_eq!(
        EmailValidator::is_valid("user@example.com", ValidatorOptions::default())
            .await
            .ok(),
        Some(true)
    );
    assert_eq!(
        EmailValidator::is_valid("nope", ValidatorOptions::default())
            .await
            .ok(),
        Some(false)
    );
    assert!(
        EmailValidator::is_valid("user@example.com", deliverability().with_api_key(""))
            .await
            .is_err()
    );
}

#[tokio::test]
async fn serialized_result_omits_absent_slots() {
    let v = with(ValidatorOptions::default(), None, None);
    let r = v.validate("invalid-email").await;
    insta::assert_snapshot!(
        serde_json::to_string(&r).expect("serializes"),
        @r#"{"email":"invalid-email","is_valid":false,"errors":["Email must contain exactly one @ symbol"],"warnings":[],"details":{"format":{"is_valid":false,"error":"Email must contain exactly one @ symbol"}}}"#
    );
}
