//! Query text normalization
//!
//! One normalization pass shared by the rule parser and every substring
//! predicate, so text matching is case-insensitive everywhere.

/// Lower-case, trim, and collapse internal whitespace.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalized whitespace-separated tokens.
pub fn tokens(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}
