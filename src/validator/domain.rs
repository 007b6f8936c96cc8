use std::sync::LazyLock;

use regex::Regex;

use super::{FormatError, ValidationMode};

pub(crate) const MAX_DOMAIN_LEN: usize = 253;

/// atext local part, LDH labels of 1..=63 chars joined by dots.
const RELAXED_PATTERN: &str = r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$";

const STRICT_PATTERN: &str = r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$";

static RELAXED: LazyLock<Regex> = LazyLock::new(|| compile(RELAXED_PATTERN));
static STRICT: LazyLock<Regex> = LazyLock::new(|| compile(STRICT_PATTERN));

fn compile(pattern: &str) -> Regex {
    // Constant patterns, covered by the tests below.
    Regex::new(pattern).expect("built-in email pattern must compile")
}

pub(crate) fn check_domain_length(domain: &str) -> Result<(), FormatError> {
    let length = domain.chars().count();
    if length == 0 || length > MAX_DOMAIN_LEN {
        return Err(FormatError::DomainLength { length });
    }
    Ok(())
}

/// Dernière règle: l'adresse complète contre le motif du mode choisi.
pub(crate) fn check_pattern(email: &str, mode: ValidationMode) -> Result<(), FormatError> {
    let pattern = match mode {
        ValidationMode::Strict => &*STRICT,
        ValidationMode::Relaxed => &*RELAXED,
    };
    if pattern.is_match(email) {
        Ok(())
    } else {
        Err(FormatError::Pattern { mode })
    }
}
