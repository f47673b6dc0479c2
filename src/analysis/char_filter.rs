//! Char filter implementations for text normalization.
//!
//! Char filters pre-process the raw text before it is passed to the
//! tokenizer.
//!
//! # Available Filters
//!
//! - [`punctuation::PunctuationDigitCharFilter`] - Drops punctuation and digits, lowercases the rest

/// Trait for character filters that transform text before tokenization.
pub trait CharFilter: Send + Sync {
    /// Apply this filter to the input text and return the filtered text.
    fn filter(&self, input: &str) -> String;

    /// Get the name of this char filter.
    fn name(&self) -> &'static str;
}

pub mod punctuation;
