//! The text preprocessor shared by corpus loading and inference.
//!
//! The same chain must run when a corpus is loaded and when a trained model
//! sees new text, otherwise the vocabulary seen at train time and the tokens
//! seen at serve time drift apart.
//!
//! # Examples
//!
//! ```
//! use sentira::analysis::analyzer::preprocessor::TextPreprocessor;
//!
//! let preprocessor = TextPreprocessor::from_stopwords(vec!["i", "this"]);
//! let tokens = preprocessor.preprocess("I'm LOVING this game!!! 10/10").unwrap();
//! assert_eq!(tokens, vec!["im", "lov", "game"]);
//! ```

use std::path::Path;
use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::char_filter::punctuation::PunctuationDigitCharFilter;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::remove_empty::RemoveEmptyFilter;
use crate::analysis::token_filter::stem::StemFilter;
use crate::analysis::token_filter::stop::StopFilter;
use crate::analysis::tokenizer::whitespace::WhitespaceTokenizer;
use crate::error::Result;

/// Normalizes raw text into stemmed, stopword-filtered tokens.
///
/// Pipeline: strip punctuation and digits and lowercase, split on
/// whitespace, drop stop words, apply the suffix stemmer, drop tokens the
/// stemmer emptied.
#[derive(Clone, Debug)]
pub struct TextPreprocessor {
    analyzer: PipelineAnalyzer,
    stop_word_count: usize,
}

impl TextPreprocessor {
    /// Create a preprocessor around the given stop word filter.
    pub fn new(stop_filter: StopFilter) -> Self {
        let stop_word_count = stop_filter.len();
        let analyzer = PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
            .add_char_filter(Arc::new(PunctuationDigitCharFilter::new()))
            .add_filter(Arc::new(stop_filter))
            .add_filter(Arc::new(StemFilter::new()))
            .add_filter(Arc::new(RemoveEmptyFilter::new()))
            .with_name("text_preprocessor");

        TextPreprocessor {
            analyzer,
            stop_word_count,
        }
    }

    /// Create a preprocessor from an in-memory stop word list.
    pub fn from_stopwords<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(StopFilter::from_words(words))
    }

    /// Create a preprocessor from a newline-delimited stop word file.
    pub fn from_stopword_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(StopFilter::from_path(path)?))
    }

    /// Run the full pipeline over `text` and return the surviving tokens.
    pub fn preprocess(&self, text: &str) -> Result<Vec<String>> {
        Ok(self.analyzer.analyze(text)?.map(|token| token.text).collect())
    }

    /// Number of stop words this preprocessor removes.
    pub fn stop_word_count(&self) -> usize {
        self.stop_word_count
    }
}

impl Default for TextPreprocessor {
    fn default() -> Self {
        Self::new(StopFilter::default())
    }
}

impl Analyzer for TextPreprocessor {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.analyzer.analyze(text)
    }

    fn name(&self) -> &str {
        self.analyzer.name()
    }
}
