use serde::{Deserialize, Serialize};

use super::DnsError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MxRecord {
    pub preference: u16,
    pub exchange: String,
}

impl MxRecord {
    pub fn new(preference: u16, exchange: impl Into<String>) -> Self {
        Self {
            preference,
            exchange: exchange.into(),
        }
    }
}

/// Outcome of the domain stage.
///
/// The record fields are only present when both lookups finished before the
/// deadline; `mx_records` keeps the order the resolver returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainReport {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_a_record: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_mx_record: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mx_records: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DomainReport {
    pub(crate) fn from_records(a_records: &[std::net::Ipv4Addr], mx_records: Vec<MxRecord>) -> Self {
        let has_a_record = !a_records.is_empty();
        let has_mx_record = !mx_records.is_empty();
        Self {
            is_valid: has_a_record || has_mx_record,
            has_a_record: Some(has_a_record),
            has_mx_record: Some(has_mx_record),
            mx_records: Some(mx_records.into_iter().map(|mx| mx.exchange).collect()),
            error: None,
        }
    }

    pub(crate) fn failed(error: &DnsError) -> Self {
        Self {
            is_valid: false,
            has_a_record: None,
            has_mx_record: None,
            mx_records: None,
            error: Some(error.to_string()),
        }
    }

    pub fn has_mx(&self) -> bool {
        self.has_mx_record.unwrap_or(false)
    }
}

/// One entry of [`check_domains_with`](crate::dns::check_domains_with).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainBatchEntry {
    pub domain: String,
    #[serde(flatten)]
    pub report: DomainReport,
}
