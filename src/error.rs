//! Error types for the Sentira library.
//!
//! All fallible operations return [`Result`], whose error type is the
//! [`SentiraError`] enum. None of these errors is fatal to the process: a
//! caller can retry with another file, fall back to training a fresh model,
//! and so on.
//!
//! # Examples
//!
//! ```
//! use sentira::error::{Result, SentiraError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(SentiraError::empty_dataset("validation set"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::fmt::Display;
use std::io;

use thiserror::Error;

/// The main error type for Sentira operations.
#[derive(Error, Debug)]
pub enum SentiraError {
    /// I/O errors (stopword lists, vocabularies, model snapshots, corpora)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid hyperparameters or configuration files
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// An operation that needs at least one sample got none
    #[error("Empty dataset: {0}")]
    EmptyDataset(String),

    /// Parameter shapes disagree, e.g. a snapshot written for another vocabulary
    #[error("Dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: String, found: String },

    /// Prediction or persistence requested before training
    #[error("Model not trained: {0}")]
    ModelNotTrained(String),

    /// A model snapshot that cannot be decoded
    #[error("Corrupted model data: {0}")]
    Corrupted(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV parsing errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with SentiraError.
pub type Result<T> = std::result::Result<T, SentiraError>;

impl SentiraError {
    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        SentiraError::Config(msg.into())
    }

    /// Create a new empty dataset error.
    pub fn empty_dataset<S: Into<String>>(msg: S) -> Self {
        SentiraError::EmptyDataset(msg.into())
    }

    /// Create a new dimension mismatch error.
    pub fn dimension_mismatch(expected: impl Display, found: impl Display) -> Self {
        SentiraError::DimensionMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Create a new not-trained error.
    pub fn not_trained<S: Into<String>>(msg: S) -> Self {
        SentiraError::ModelNotTrained(msg.into())
    }

    /// Create a new corrupted data error.
    pub fn corrupted<S: Into<String>>(msg: S) -> Self {
        SentiraError::Corrupted(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        SentiraError::Other(msg.into())
    }
}
