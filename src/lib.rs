#![forbid(unsafe_code)]
//! mailvet_lib: email validation pipeline: format, DNS, deliverability providers.

pub mod dns;
pub mod pipeline;
pub mod provider;
pub mod validator;

mod util;

pub use dns::{
    DEFAULT_DNS_TIMEOUT, DnsError, DomainBatchEntry, DomainReport, LookupRecords, MxRecord,
    check_domain, check_domain_with, check_domains_with,
};
pub use pipeline::{
    BatchSummary, BatchValidationResult, Collaborators, ConfigError, EmailValidator,
    ValidationDetails, ValidationResult, ValidatorOptions,
};
pub use provider::{
    ApiValidator, DEFAULT_API_TIMEOUT, DEFAULT_BATCH_DELAY, HttpRequest, HttpResponse,
    HttpTransport, Provider, ProviderError, ProviderResponse, ReqwestTransport, TransportError,
};
pub use validator::{
    FormatBatchEntry, FormatError, FormatReport, ValidationMode, check_format, format_report,
    format_report_batch,
};
