//! Token filter implementations for token transformation.
//!
//! Filters transform token streams produced by tokenizers. They can modify,
//! remove, or mark tokens.
//!
//! # Available Filters
//!
//! - [`stop::StopFilter`] - Removes stop words
//! - [`stem::StemFilter`] - Reduces words to their stem form
//! - [`remove_empty::RemoveEmptyFilter`] - Removes tokens emptied by stemming
//!
//! # Filter Chaining
//!
//! ```text
//! Tokenizer → Stop Words → Stemmer → Remove Empty
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for filters that transform token streams.
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod remove_empty;
pub mod stem;
pub mod stop;
