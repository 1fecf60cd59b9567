//! String utility functions for text processing

/// Split a comma separated list into its items
///
/// Items are kept verbatim, so an empty input yields a single empty item.
///
/// # Arguments
///
/// * `s` - The comma separated list
pub fn split_list(s: &str) -> Vec<String> {
    s.split(',').map(str::to_string).collect()
}

/// Return `s`, or `fallback` when `s` is empty
pub fn or_default<'a>(s: &'a str, fallback: &'a str) -> &'a str {
    if s.is_empty() {
        fallback
    } else {
        s
    }
}

/// Return `s`, or the literal `"none"` when `s` is empty
pub fn or_none(s: &str) -> String {
    or_default(s, "none").to_string()
}
