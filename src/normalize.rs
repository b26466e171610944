//! Comparison keys for titles and patron names.
//!
//! Every lookup in the catalog compares normalized keys, so "Café", "CAFE" and
//! "cafe" all resolve to the same title.

use std::ops::RangeInclusive;

use unicode_normalization::UnicodeNormalization;

/// The Combining Diacritical Marks block, removed after canonical decomposition
const COMBINING_DIACRITICAL_MARKS: RangeInclusive<char> = '\u{0300}'..='\u{036F}';

/// Build the comparison key for `input`.
///
/// Applies canonical decomposition (NFD), drops combining diacritical marks and
/// lower-cases what is left. The result is stable under repeated application.
#[must_use]
pub fn normalize(input: &str) -> String {
    // Lower-cased as a whole string so context rules such as the Greek final sigma apply
    input
        .nfd()
        .filter(|c| !COMBINING_DIACRITICAL_MARKS.contains(c))
        .collect::<String>()
        .to_lowercase()
}

/// Like [`normalize`], passing an absent value through untouched
#[must_use]
pub fn normalize_opt(input: Option<&str>) -> Option<String> {
    input.map(normalize)
}

/// Whether two strings share a comparison key
#[must_use]
pub fn matches(left: &str, right: &str) -> bool {
    normalize(left) == normalize(right)
}
