//! Sheet name → record field identifier

use crate::error::{AabwError, AabwResult};

/// Normalize a sheet name into a field identifier.
///
/// Words are split on whitespace and hyphens, each word gets an uppercase
/// first letter (the rest is untouched), and the words are joined with no
/// separator. A leading digit gets an `_` prefix.
///
/// ```
/// use aabw::excel::normalize_identifier;
///
/// assert_eq!(normalize_identifier("sea-surface temp")?, "SeaSurfaceTemp");
/// assert_eq!(normalize_identifier("2023-data")?, "_2023Data");
/// # Ok::<(), aabw::AabwError>(())
/// ```
pub fn normalize_identifier(name: &str) -> AabwResult<String> {
    let mut identifier = String::with_capacity(name.len() + 1);

    for word in name.split(|c: char| c.is_whitespace() || c == '-') {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            identifier.extend(first.to_uppercase());
            identifier.push_str(chars.as_str());
        }
    }

    match identifier.chars().next() {
        None => Err(AabwError::InvalidTableName(name.to_string())),
        Some(c) if c.is_numeric() => Ok(format!("_{}", identifier)),
        Some(_) => Ok(identifier),
    }
}
