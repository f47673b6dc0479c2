//! # Sentira
//!
//! Supervised sentiment classification of short social-media posts.
//!
//! ## Features
//!
//! - Pure Rust implementation
//! - Text analysis pipeline (punctuation stripping, stop words, suffix stemming)
//! - Bag-of-words vocabularies and feature vectors
//! - Naive Bayes, logistic regression, linear SVM and a two-layer network
//! - Byte-exact little-endian model snapshots

pub mod analysis;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod dataset;
pub mod error;
pub mod model;
pub mod vocabulary;

pub mod prelude {
    pub use crate::analysis::analyzer::preprocessor::TextPreprocessor;
    pub use crate::config::SentiraConfig;
    pub use crate::dataset::{Dataset, Sample, Sentiment};
    pub use crate::error::{Result, SentiraError};
    pub use crate::model::logistic::LogisticRegression;
    pub use crate::model::naive_bayes::NaiveBayesClassifier;
    pub use crate::model::network::TwoLayerNetwork;
    pub use crate::model::svm::SvmClassifier;
    pub use crate::model::{Persistable, Predictable, Trainable, TrainingReport};
    pub use crate::vocabulary::Vocabulary;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
