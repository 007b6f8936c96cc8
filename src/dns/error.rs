use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DnsError {
    #[error("domain is empty")]
    EmptyDomain,
    #[error("domain IDNA conversion failed")]
    IdnaConversion {
        #[source]
        source: idna::Errors,
    },
    #[error("resolver initialization failed: {source}")]
    ResolverInit {
        #[source]
        source: trust_dns_resolver::error::ResolveError,
    },
    #[error("DNS lookup timeout after {}ms", .elapsed.as_millis())]
    Timeout { elapsed: Duration },
    #[error("DNS lookup aborted: {0}")]
    Panicked(String),
}

impl DnsError {
    pub(crate) fn idna(source: idna::Errors) -> Self {
        Self::IdnaConversion { source }
    }

    pub(crate) fn resolver_init(source: trust_dns_resolver::error::ResolveError) -> Self {
        Self::ResolverInit { source }
    }

    pub(crate) fn timeout(elapsed: Duration) -> Self {
        Self::Timeout { elapsed }
    }
}
