use std::net::Ipv4Addr;

use async_trait::async_trait;
use trust_dns_resolver::{TokioAsyncResolver, error::ResolveError};

use super::{DnsError, MxRecord};

/// Name-resolution collaborator. Implementations report "no records" as an
/// empty list or an error; the caller treats both the same way.
#[async_trait]
pub trait LookupRecords: Send + Sync {
    async fn lookup_a(&self, domain: &str) -> Result<Vec<Ipv4Addr>, ResolveError>;
    async fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, ResolveError>;
}

#[async_trait]
impl LookupRecords for TokioAsyncResolver {
    async fn lookup_a(&self, domain: &str) -> Result<Vec<Ipv4Addr>, ResolveError> {
        let lookup = self.ipv4_lookup(domain).await?;
        Ok(lookup.iter().map(|a| Ipv4Addr::from(*a)).collect())
    }

    async fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, ResolveError> {
        let lookup = self.mx_lookup(domain).await?;
        Ok(lookup
            .iter()
            .map(|mx| MxRecord::new(mx.preference(), normalize_exchange(mx.exchange().to_utf8())))
            .collect())
    }
}

/// Resolver built from the host configuration (`/etc/resolv.conf` or the
/// platform equivalent).
pub fn system_resolver() -> Result<TokioAsyncResolver, DnsError> {
    TokioAsyncResolver::tokio_from_system_conf().map_err(DnsError::resolver_init)
}

pub(crate) fn normalize_domain(domain: &str) -> Result<String, DnsError> {
    let trimmed = domain.trim();
    if trimmed.is_empty() {
        return Err(DnsError::EmptyDomain);
    }
    idna::domain_to_ascii(trimmed).map_err(DnsError::idna)
}

pub(crate) fn normalize_exchange(exchange: String) -> String {
    let trimmed = exchange.trim_end_matches('.');
    trimmed.to_ascii_lowercase()
}
