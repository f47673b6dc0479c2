//! Stop filter implementation.
//!
//! This module provides a filter that removes common words (stop words) that
//! carry little sentiment signal. The word list is an external resource: a
//! flat, newline-delimited file loaded once with [`StopFilter::from_path`].
//!
//! # Examples
//!
//! ```
//! use sentira::analysis::token_filter::Filter;
//! use sentira::analysis::token_filter::stop::StopFilter;
//! use sentira::analysis::token::Token;
//!
//! let filter = StopFilter::from_words(vec!["the", "a"]);
//! let tokens = vec![
//!     Token::new("the", 0),
//!     Token::new("quick", 1),
//!     Token::new("fox", 2)
//! ];
//!
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(result.len(), 2);
//! assert_eq!(result[0].text, "quick");
//! ```

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::sync::Arc;

use log::debug;

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// A filter that removes stop words from the token stream.
#[derive(Clone, Debug)]
pub struct StopFilter {
    /// The set of stop words to remove
    stop_words: Arc<HashSet<String>>,
}

impl StopFilter {
    /// Create a new stop filter with custom stop words.
    pub fn with_stop_words(stop_words: HashSet<String>) -> Self {
        StopFilter {
            stop_words: Arc::new(stop_words),
        }
    }

    /// Create a new stop filter from a list of stop words.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let stop_words = words.into_iter().map(|s| s.into()).collect();
        Self::with_stop_words(stop_words)
    }

    /// Load a newline-delimited stop word list from a file.
    ///
    /// Fails with an I/O error when the file cannot be opened or read.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let filter = Self::from_reader(file)?;
        debug!(
            "Loaded {} stop words from {}",
            filter.len(),
            path.as_ref().display()
        );
        Ok(filter)
    }

    /// Read a newline-delimited stop word list. Blank lines are ignored and
    /// trailing whitespace (including `\r`) is trimmed.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut stop_words = HashSet::new();
        for line in BufReader::new(reader).lines() {
            let line = line?;
            let word = line.trim_end();
            if !word.is_empty() {
                stop_words.insert(word.to_string());
            }
        }
        Ok(Self::with_stop_words(stop_words))
    }

    /// Check if a word is a stop word.
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Get the number of stop words.
    pub fn len(&self) -> usize {
        self.stop_words.len()
    }

    /// Check if the stop word set is empty.
    pub fn is_empty(&self) -> bool {
        self.stop_words.is_empty()
    }
}

impl Default for StopFilter {
    fn default() -> Self {
        Self::with_stop_words(HashSet::new())
    }
}

impl Filter for StopFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered_tokens: Vec<Token> = tokens
            .filter(|token| !self.is_stop_word(&token.text))
            .collect();

        Ok(Box::new(filtered_tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "stop"
    }
}
