//! Hyperparameters for the four classifiers.
//!
//! Each model has its own config struct with sensible defaults. They are
//! grouped in [`SentiraConfig`], which can be read from a JSON file where every
//! section and every field is optional:
//!
//! ```
//! use sentira::config::SentiraConfig;
//!
//! let config: SentiraConfig =
//!     serde_json::from_str(r#"{ "svm": { "epochs": 3 } }"#).unwrap();
//! assert_eq!(config.svm.epochs, 3);
//! assert_eq!(config.svm.learning_rate, 0.01);
//! assert_eq!(config.naive_bayes.laplace, 1.0);
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SentiraError};

fn check_positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SentiraError::config(format!(
            "{name} must be a positive finite number, got {value}"
        )))
    }
}

fn check_non_negative(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SentiraError::config(format!(
            "{name} must be a non-negative finite number, got {value}"
        )))
    }
}

fn check_nonzero(name: &str, value: usize) -> Result<()> {
    if value == 0 {
        Err(SentiraError::config(format!("{name} must be at least 1")))
    } else {
        Ok(())
    }
}

/// Configuration for the Naive Bayes classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NaiveBayesConfig {
    /// Laplace (additive) smoothing constant.
    pub laplace: f64,
}

impl Default for NaiveBayesConfig {
    fn default() -> Self {
        NaiveBayesConfig { laplace: 1.0 }
    }
}

impl NaiveBayesConfig {
    pub fn validate(&self) -> Result<()> {
        check_positive("laplace", self.laplace)
    }
}

/// Configuration for logistic regression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogisticRegressionConfig {
    pub learning_rate: f64,
    pub epochs: usize,
}

impl Default for LogisticRegressionConfig {
    fn default() -> Self {
        LogisticRegressionConfig {
            learning_rate: 0.1,
            epochs: 10,
        }
    }
}

impl LogisticRegressionConfig {
    pub fn validate(&self) -> Result<()> {
        check_positive("learning_rate", self.learning_rate)?;
        check_nonzero("epochs", self.epochs)
    }
}

/// Configuration for the hinge-loss linear classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SvmConfig {
    pub learning_rate: f64,
    pub epochs: usize,
    /// L2 regularization strength (lambda).
    pub regularization: f64,
}

impl Default for SvmConfig {
    fn default() -> Self {
        SvmConfig {
            learning_rate: 0.01,
            epochs: 10,
            regularization: 0.01,
        }
    }
}

impl SvmConfig {
    pub fn validate(&self) -> Result<()> {
        check_positive("learning_rate", self.learning_rate)?;
        check_nonzero("epochs", self.epochs)?;
        check_non_negative("regularization", self.regularization)
    }
}

/// Configuration for the two-layer network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Number of ReLU units in the hidden layer.
    pub hidden_size: usize,
    pub learning_rate: f64,
    pub epochs: usize,
    /// Seed for weight initialization. `None` draws a fresh seed.
    pub seed: Option<u64>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        NetworkConfig {
            hidden_size: 16,
            learning_rate: 0.01,
            epochs: 10,
            seed: None,
        }
    }
}

impl NetworkConfig {
    pub fn validate(&self) -> Result<()> {
        check_nonzero("hidden_size", self.hidden_size)?;
        check_positive("learning_rate", self.learning_rate)?;
        check_nonzero("epochs", self.epochs)
    }
}

/// Configuration for every model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SentiraConfig {
    pub naive_bayes: NaiveBayesConfig,
    pub logistic: LogisticRegressionConfig,
    pub svm: SvmConfig,
    pub network: NetworkConfig,
}

impl SentiraConfig {
    /// Read a JSON configuration file. Missing fields take their defaults.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let config: SentiraConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<()> {
        self.naive_bayes.validate()?;
        self.logistic.validate()?;
        self.svm.validate()?;
        self.network.validate()
    }
}
