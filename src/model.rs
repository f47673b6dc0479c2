//! Sentiment models and the capabilities they share.
//!
//! Every classifier is its own struct implementing three traits:
//!
//! - [`Trainable`]: fit parameters to a [`Dataset`] and report per-epoch diagnostics
//! - [`Predictable`]: label a token sequence and measure accuracy over a dataset
//! - [`Persistable`]: write and read a byte-exact parameter snapshot
//!
//! # Available Models
//!
//! - [`naive_bayes::NaiveBayesClassifier`] - Multinomial Naive Bayes with Laplace smoothing
//! - [`logistic::LogisticRegression`] - Linear model trained on the logistic loss
//! - [`svm::SvmClassifier`] - Linear model trained on the regularized hinge loss
//! - [`network::TwoLayerNetwork`] - ReLU hidden layer with a sigmoid output

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::dataset::{Dataset, Sentiment};
use crate::error::{Result, SentiraError};
use crate::vocabulary::Vocabulary;

pub mod codec;
pub mod logistic;
pub mod naive_bayes;
pub mod network;
pub mod svm;

/// Diagnostics for a single training epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochReport {
    /// One-based epoch number.
    pub epoch: usize,
    /// Loss accumulated over the epoch.
    pub loss: f64,
    /// Accuracy on the development set after the epoch, in percent.
    pub dev_accuracy: Option<f64>,
}

/// Diagnostics returned by [`Trainable::train`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    pub model: String,
    pub epochs: Vec<EpochReport>,
    pub dev_accuracy: Option<f64>,
}

impl TrainingReport {
    pub fn new<S: Into<String>>(model: S) -> Self {
        TrainingReport {
            model: model.into(),
            epochs: Vec::new(),
            dev_accuracy: None,
        }
    }

    /// Record an epoch and log it.
    pub fn push_epoch(&mut self, epoch: usize, total: usize, loss: f64, dev_accuracy: Option<f64>) {
        match dev_accuracy {
            Some(accuracy) => info!(
                "{} epoch {epoch}/{total}: loss={loss:.6} dev_accuracy={accuracy:.2}%",
                self.model
            ),
            None => info!("{} epoch {epoch}/{total}: loss={loss:.6}", self.model),
        }

        self.epochs.push(EpochReport {
            epoch,
            loss,
            dev_accuracy,
        });
        self.dev_accuracy = dev_accuracy;
    }

    /// Loss of the last recorded epoch.
    pub fn final_loss(&self) -> Option<f64> {
        self.epochs.last().map(|e| e.loss)
    }
}

/// Percentage of `correct` out of `total`.
///
/// Fails with [`SentiraError::EmptyDataset`] when `total` is zero.
pub fn accuracy(correct: usize, total: usize) -> Result<f64> {
    if total == 0 {
        return Err(SentiraError::empty_dataset(
            "accuracy is undefined without samples",
        ));
    }
    Ok(100.0 * correct as f64 / total as f64)
}

/// Common identity of every model.
pub trait Model {
    /// Short model name used in logs and reports.
    fn name(&self) -> &'static str;
}

/// Models that can be fitted to a labeled dataset.
pub trait Trainable: Model {
    /// Hyperparameters consumed by [`Trainable::train`].
    type Config;

    /// Fit the model parameters to `dataset`.
    ///
    /// `vocabulary` must have been built from `dataset`. When `dev` is given,
    /// accuracy on it is reported after every epoch.
    fn train(
        &mut self,
        dataset: &Dataset,
        vocabulary: &Vocabulary,
        dev: Option<&Dataset>,
        config: &Self::Config,
    ) -> Result<TrainingReport>;
}

/// Models that can label token sequences.
pub trait Predictable: Model {
    /// Predict the label of a preprocessed token sequence.
    fn predict_tokens(&self, tokens: &[String], vocabulary: &Vocabulary) -> Result<Sentiment>;

    /// Percentage of samples in `dataset` whose label is predicted correctly.
    fn evaluate(&self, dataset: &Dataset, vocabulary: &Vocabulary) -> Result<f64> {
        if dataset.is_empty() {
            return Err(SentiraError::empty_dataset(format!(
                "cannot evaluate {} on an empty dataset",
                self.name()
            )));
        }

        let mut correct = 0;
        for sample in dataset {
            if self.predict_tokens(sample.tokens(), vocabulary)? == sample.label() {
                correct += 1;
            }
        }

        accuracy(correct, dataset.len())
    }
}

/// Models whose parameters can be saved and restored.
///
/// A failed read leaves the in-memory parameters untouched.
pub trait Persistable: Model {
    /// Encode the parameters.
    fn write_to(&self, writer: &mut dyn Write) -> Result<()>;

    /// Decode parameters written by [`Persistable::write_to`].
    fn read_from(&mut self, reader: &mut dyn Read) -> Result<()>;

    /// Save the parameters to `path`.
    fn save_weights(&self, path: &Path) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(&mut writer)?;
        writer.flush()?;

        info!("Saved {} weights to {}", self.name(), path.display());
        Ok(())
    }

    /// Load the parameters from `path`.
    fn load_weights(&mut self, path: &Path) -> Result<()> {
        let mut reader = BufReader::new(File::open(path)?);
        self.read_from(&mut reader)?;

        info!("Loaded {} weights from {}", self.name(), path.display());
        Ok(())
    }
}

/// The development set to report on, or `None` when it has no samples.
pub(crate) fn usable_dev<'a>(dev: Option<&'a Dataset>, model: &str) -> Option<&'a Dataset> {
    match dev {
        Some(dev) if dev.is_empty() => {
            warn!("{model}: development set has no samples, dev accuracy will not be reported");
            None
        }
        dev => dev,
    }
}

/// Accuracy on an optional development set.
pub(crate) fn dev_accuracy<M: Predictable + ?Sized>(
    model: &M,
    dev: Option<&Dataset>,
    vocabulary: &Vocabulary,
) -> Result<Option<f64>> {
    dev.map(|dev| model.evaluate(dev, vocabulary)).transpose()
}

/// Fail with [`SentiraError::EmptyDataset`] when there is nothing to train on.
pub(crate) fn ensure_trainable(dataset: &Dataset, model: &str) -> Result<()> {
    if dataset.is_empty() {
        Err(SentiraError::empty_dataset(format!(
            "cannot train {model} without samples"
        )))
    } else {
        Ok(())
    }
}

pub(crate) fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

pub(crate) fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}
