//! Text analysis module for Sentira.
//!
//! This module turns raw post text into normalized tokens. The pipeline is
//! assembled from small pieces that each do one thing:
//!
//! ```text
//! Raw Text → Char Filter → Tokenizer → Stop Filter → Stem Filter → Remove Empty → Tokens
//! ```
//!
//! [`TextPreprocessor`](analyzer::preprocessor::TextPreprocessor) wires the
//! standard chain together and is used both when a corpus is loaded and when
//! a model predicts on new text.

pub mod analyzer;
pub mod char_filter;
pub mod token;
pub mod token_filter;
pub mod tokenizer;
