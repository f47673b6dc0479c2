//! Punctuation and digit stripping char filter.
//!
//! # Examples
//!
//! ```
//! use sentira::analysis::char_filter::CharFilter;
//! use sentira::analysis::char_filter::punctuation::PunctuationDigitCharFilter;
//!
//! let filter = PunctuationDigitCharFilter::new();
//! assert_eq!(filter.filter("I'm LOVING it, 10/10!"), "im loving it ");
//! ```

use super::CharFilter;

/// Removes ASCII punctuation and ASCII digits and lowercases every other
/// character.
///
/// Whitespace is preserved so that the tokenizer can still split the result.
#[derive(Clone, Debug, Default)]
pub struct PunctuationDigitCharFilter;

impl PunctuationDigitCharFilter {
    /// Create a new punctuation/digit char filter.
    pub fn new() -> Self {
        PunctuationDigitCharFilter
    }
}

impl CharFilter for PunctuationDigitCharFilter {
    fn filter(&self, input: &str) -> String {
        let mut result = String::with_capacity(input.len());
        for c in input.chars() {
            if c.is_ascii_punctuation() || c.is_ascii_digit() {
                continue;
            }
            result.extend(c.to_lowercase());
        }
        result
    }

    fn name(&self) -> &'static str {
        "punctuation_digit"
    }
}
