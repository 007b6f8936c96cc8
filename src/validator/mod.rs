//! Syntactic email checks: no I/O, deterministic, safe to share across threads.

mod domain;
mod local;
mod types;

pub use types::{FormatBatchEntry, FormatError, FormatReport, ValidationMode};

use domain::{check_domain_length, check_pattern};
use local::{check_local_dots, check_local_length};

pub const MAX_EMAIL_LEN: usize = 254;

/// Runs the format rules in order and returns the first one violated.
pub fn check_format(email: &str, mode: ValidationMode) -> Result<(), FormatError> {
    if email.is_empty() {
        return Err(FormatError::Empty);
    }

    let length = email.chars().count();
    if length > MAX_EMAIL_LEN {
        return Err(FormatError::TooLong { length });
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return Err(FormatError::AtSignCount {
            found: parts.len() - 1,
        });
    }
    let (local, domain) = (parts[0], parts[1]);

    check_local_length(local)?;
    check_domain_length(domain)?;

    if email.contains("..") {
        return Err(FormatError::ConsecutiveDots);
    }

    check_local_dots(local)?;
    check_pattern(email, mode)
}

pub fn format_report(email: &str, mode: ValidationMode) -> FormatReport {
    check_format(email, mode).into()
}

/// Same as [`format_report`] over a sequence, keeping input order.
pub fn format_report_batch<I, S>(emails: I, mode: ValidationMode) -> Vec<FormatBatchEntry>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    emails
        .into_iter()
        .map(|email| {
            let email = email.as_ref();
            FormatBatchEntry {
                email: email.to_string(),
                report: format_report(email, mode),
            }
        })
        .collect()
}
