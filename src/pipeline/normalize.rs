/// Canonicalizes a string for fuzzy cross-source comparison: lowercase, with
/// every character outside `[a-zA-Z0-9]` dropped.
pub(crate) fn normalize(value: &str) -> String {
    value
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
