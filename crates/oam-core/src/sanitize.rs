//! Filename-component sanitization.

/// Reduces `name` to the character class `[A-Za-z0-9_-]`; every other
/// character becomes `_`. Total and idempotent, so the result is always a
/// valid single path component.
pub fn component(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
