//! Domain resolvability check: concurrent A and MX lookups bounded by a
//! deadline.
//!
//! The public entry points are [`check_domain`], which uses the system
//! resolver, and [`check_domain_with`], which takes any [`LookupRecords`]
//! implementation.

mod error;
mod resolver;
mod types;

pub use error::DnsError;
pub use resolver::{LookupRecords, system_resolver};
pub use types::{DomainBatchEntry, DomainReport, MxRecord};

use std::panic::AssertUnwindSafe;
use std::time::Duration;

use futures::FutureExt;
use futures::future::join_all;

use crate::util::panic_message;

pub const DEFAULT_DNS_TIMEOUT: Duration = Duration::from_millis(5_000);

/// Resolve `domain` with the system resolver.
pub async fn check_domain(domain: &str, timeout: Duration) -> DomainReport {
    match system_resolver() {
        Ok(resolver) => check_domain_with(&resolver, domain, timeout).await,
        Err(err) => {
            tracing::warn!(error = %err, "system resolver unavailable");
            DomainReport::failed(&err)
        }
    }
}

/// Issues the A and MX lookups concurrently and races them against `timeout`.
///
/// A failed lookup counts as an empty record set. When the deadline fires
/// first the pending lookups are dropped and the report is invalid.
pub async fn check_domain_with<R>(resolver: &R, domain: &str, timeout: Duration) -> DomainReport
where
    R: LookupRecords + ?Sized,
{
    let ascii = match resolver::normalize_domain(domain) {
        Ok(ascii) => ascii,
        Err(err) => return DomainReport::failed(&err),
    };

    let lookups = async {
        let a = async {
            resolver.lookup_a(&ascii).await.unwrap_or_else(|err| {
                tracing::debug!(domain = %ascii, error = %err, "A lookup failed");
                Vec::new()
            })
        };
        let mx = async {
            resolver.lookup_mx(&ascii).await.unwrap_or_else(|err| {
                tracing::debug!(domain = %ascii, error = %err, "MX lookup failed");
                Vec::new()
            })
        };
        tokio::join!(a, mx)
    };

    match tokio::time::timeout(timeout, AssertUnwindSafe(lookups).catch_unwind()).await {
        Ok(Ok((a_records, mx_records))) => {
            tracing::debug!(
                domain = %ascii,
                a = a_records.len(),
                mx = mx_records.len(),
                "domain resolved"
            );
            DomainReport::from_records(&a_records, mx_records)
        }
        Ok(Err(payload)) => DomainReport::failed(&DnsError::Panicked(panic_message(payload.as_ref()))),
        Err(_) => {
            tracing::debug!(domain = %ascii, ?timeout, "DNS lookup timed out");
            DomainReport::failed(&DnsError::timeout(timeout))
        }
    }
}

/// Resolves every domain concurrently; the output follows input order.
pub async fn check_domains_with<R, I, S>(
    resolver: &R,
    domains: I,
    timeout: Duration,
) -> Vec<DomainBatchEntry>
where
    R: LookupRecords + ?Sized,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let checks = domains.into_iter().map(|domain| {
        let domain = domain.as_ref().to_string();
        async move {
            let report = check_domain_with(resolver, &domain, timeout).await;
            DomainBatchEntry { domain, report }
        }
    });
    join_all(checks).await
}
