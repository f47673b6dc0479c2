//! Suffix-stripping stemmer.

use super::Stemmer;

/// A single suffix rule: when the word ends with `suffix` and is at least
/// `min_len` bytes long, the suffix is replaced by `replacement`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SuffixRule {
    suffix: &'static str,
    replacement: &'static str,
    min_len: usize,
}

const fn rule(suffix: &'static str, replacement: &'static str, min_len: usize) -> SuffixRule {
    SuffixRule {
        suffix,
        replacement,
        min_len,
    }
}

/// Rules in evaluation order. Each rule fires at most once and sees the
/// output of the rules before it.
const RULES: &[SuffixRule] = &[
    rule("ing", "", 3),
    rule("tion", "te", 4),
    rule("ed", "", 2),
    rule("ly", "", 2),
    rule("s", "", 2),
    rule("es", "", 2),
    rule("ness", "", 4),
];

/// Crude English stemmer that strips a fixed cascade of suffixes.
///
/// No dictionary lookup is involved, so stemming is constant work per token.
/// Rules are not exclusive: `"speeding"` loses `"ing"` and then `"ed"`,
/// ending up as `"spe"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SuffixStemmer;

impl SuffixStemmer {
    /// Create a new suffix stemmer.
    pub fn new() -> Self {
        SuffixStemmer
    }
}

impl Stemmer for SuffixStemmer {
    fn stem(&self, word: &str) -> String {
        let mut result = word.to_string();

        for rule in RULES {
            if result.len() >= rule.min_len && result.ends_with(rule.suffix) {
                result.truncate(result.len() - rule.suffix.len());
                result.push_str(rule.replacement);
            }
        }

        result
    }

    fn name(&self) -> &'static str {
        "suffix"
    }
}
