/// Name and count normalization
///
/// Card names typed on a Japanese IME come in full-width and half-width
/// flavours. Everything is folded through NFKC before it's used as a key.

use crate::error::{LedgerError, Result};
use regex::Regex;
use std::sync::OnceLock;
use unicode_normalization::UnicodeNormalization;

// Optional sign, then ASCII digits. Checked after NFKC, so "３" is already "3".
const COUNT_PATTERN: &str = r"^[+-]?[0-9]+$";

fn count_regex() -> &'static Regex {
    static COUNT_RE: OnceLock<Regex> = OnceLock::new();
    COUNT_RE.get_or_init(|| Regex::new(COUNT_PATTERN).expect("count pattern is valid"))
}

/// Normalize a card name to NFKC.
///
/// Idempotent: `normalize(&normalize(x)) == normalize(x)`.
pub fn normalize(raw: &str) -> String {
    raw.nfkc().collect()
}

/// Parse a count typed by the user (or read from the file).
///
/// The text is normalized first so full-width digits and signs are accepted,
/// then surrounding whitespace is dropped.
///
/// # Returns
/// * `Ok(i64)` - The parsed count
/// * `Err(LedgerError::Validation)` - Empty, non-numeric or out of range
pub fn parse_count(text: &str) -> Result<i64> {
    let normalized = normalize(text);
    let trimmed = normalized.trim();

    if trimmed.is_empty() {
        return Err(LedgerError::Validation("Please enter a count.".to_string()));
    }

    if !count_regex().is_match(trimmed) {
        return Err(LedgerError::Validation(format!(
            "'{}' is not a valid count. Please enter a whole number.",
            text.trim()
        )));
    }

    trimmed.parse::<i64>().map_err(|_| {
        LedgerError::Validation(format!("'{}' is too large to be a count.", trimmed))
    })
}
