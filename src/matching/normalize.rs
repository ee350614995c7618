//! Text canonicalization for reference numbers and counterparty names

/// Normalize a payment reference so it can be compared reliably.
///
/// Strips every whitespace character and removes leading zeros, so
/// `" 00123 "` and `"123"` compare equal. Empty and all-zero inputs carry
/// no identity and normalize to `None`.
pub fn normalize_reference(raw: &str) -> Option<String> {
    let stripped: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    let trimmed = stripped.trim_start_matches('0');

    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Normalize a counterparty name for exact comparison.
///
/// Lowercases the input, drops the configured business-entity suffixes as
/// whole words, and collapses every run of characters outside
/// `[a-z0-9äöå]` to a single space. Names that normalize to nothing
/// (including bare suffixes like `"Oy"`) yield `None`.
pub fn normalize_name(raw: &str, legal_suffixes: &[String]) -> Option<String> {
    let lowered = raw.to_lowercase();

    let spaced: String = lowered
        .chars()
        .map(|c| if is_name_char(c) { c } else { ' ' })
        .collect();

    let normalized = spaced
        .split_whitespace()
        .filter(|token| !legal_suffixes.iter().any(|s| s.eq_ignore_ascii_case(token)))
        .collect::<Vec<_>>()
        .join(" ");

    if normalized.is_empty() {
        None
    } else {
        Some(normalized)
    }
}

/// Characters that survive name normalization. The three Nordic vowels
/// are kept alongside lowercase ASCII letters and digits.
fn is_name_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, 'ä' | 'ö' | 'å')
}
