use super::FormatError;

pub(crate) const MAX_LOCAL_LEN: usize = 64;

/// Longueur 1..=64, comptée en caractères.
pub(crate) fn check_local_length(local: &str) -> Result<(), FormatError> {
    let length = local.chars().count();
    if length == 0 || length > MAX_LOCAL_LEN {
        return Err(FormatError::LocalLength { length });
    }
    Ok(())
}

/// The `..` rule is checked on the whole address before this runs.
pub(crate) fn check_local_dots(local: &str) -> Result<(), FormatError> {
    if local.starts_with('.') || local.ends_with('.') {
        return Err(FormatError::LocalDotEdge);
    }
    Ok(())
}
