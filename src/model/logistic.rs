//! Logistic regression trained by per-sample gradient descent.

use std::io::{Read, Write};

use log::debug;

use crate::config::LogisticRegressionConfig;
use crate::dataset::{Dataset, Sentiment};
use crate::error::{Result, SentiraError};
use crate::model::codec::{ModelReader, ModelWriter};
use crate::model::{
    Model, Persistable, Predictable, Trainable, TrainingReport, dev_accuracy, dot,
    ensure_trainable, sigmoid, usable_dev,
};
use crate::vocabulary::Vocabulary;

/// Probabilities are clipped into `[EPSILON, 1 - EPSILON]` before the log loss.
pub const EPSILON: f64 = 1e-10;

fn clip(p: f64) -> f64 {
    p.clamp(EPSILON, 1.0 - EPSILON)
}

/// Binary logistic regression over bag-of-words features.
///
/// Positive samples are the target class; every other label is the
/// negative class.
#[derive(Debug, Clone, PartialEq)]
pub struct LogisticRegression {
    weights: Vec<f64>,
    bias: f64,
}

impl LogisticRegression {
    /// Create a zero-initialized model with `num_features` weights.
    pub fn new(num_features: usize) -> Self {
        LogisticRegression {
            weights: vec![0.0; num_features],
            bias: 0.0,
        }
    }

    pub fn num_features(&self) -> usize {
        self.weights.len()
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    /// Probability that `features` belong to the positive class.
    pub fn probability(&self, features: &[f64]) -> f64 {
        sigmoid(dot(&self.weights, features) + self.bias)
    }

    /// Apply one gradient step for a single sample and return its log loss.
    ///
    /// `target` is 1 for the positive class and 0 otherwise.
    pub fn update_weights(&mut self, features: &[f64], target: f64, learning_rate: f64) -> f64 {
        let p = self.probability(features);
        let clipped = clip(p);

        let loss = -target * clipped.ln() - (1.0 - target) * (1.0 - clipped).ln();
        let error = target - clipped;
        let step = learning_rate * error * p * (1.0 - p);

        for (weight, feature) in self.weights.iter_mut().zip(features) {
            *weight += step * feature;
        }
        self.bias += step;

        loss
    }

    fn check_dimension(&self, vocabulary: &Vocabulary) -> Result<()> {
        if vocabulary.len() == self.weights.len() {
            Ok(())
        } else {
            Err(SentiraError::dimension_mismatch(
                format!("{} features", self.weights.len()),
                format!("{} vocabulary tokens", vocabulary.len()),
            ))
        }
    }
}

impl Model for LogisticRegression {
    fn name(&self) -> &'static str {
        "logistic"
    }
}

impl Trainable for LogisticRegression {
    type Config = LogisticRegressionConfig;

    fn train(
        &mut self,
        dataset: &Dataset,
        vocabulary: &Vocabulary,
        dev: Option<&Dataset>,
        config: &Self::Config,
    ) -> Result<TrainingReport> {
        config.validate()?;
        ensure_trainable(dataset, self.name())?;
        self.check_dimension(vocabulary)?;
        let dev = usable_dev(dev, self.name());

        debug!(
            "logistic: {} samples, {} features, {} positive",
            dataset.len(),
            vocabulary.len(),
            dataset.count_label(Sentiment::Positive)
        );

        let mut report = TrainingReport::new(self.name());
        for epoch in 1..=config.epochs {
            let mut total_loss = 0.0;
            for sample in dataset {
                let features = vocabulary.vectorize(sample.tokens());
                total_loss += self.update_weights(
                    &features,
                    sample.label().binary_target(),
                    config.learning_rate,
                );
            }

            let accuracy = dev_accuracy(&*self, dev, vocabulary)?;
            report.push_epoch(epoch, config.epochs, total_loss, accuracy);
        }

        Ok(report)
    }
}

impl Predictable for LogisticRegression {
    fn predict_tokens(&self, tokens: &[String], vocabulary: &Vocabulary) -> Result<Sentiment> {
        self.check_dimension(vocabulary)?;
        let features = vocabulary.vectorize(tokens);

        if self.probability(&features) >= 0.5 {
            Ok(Sentiment::Positive)
        } else {
            Ok(Sentiment::Negative)
        }
    }
}

impl Persistable for LogisticRegression {
    fn write_to(&self, writer: &mut dyn Write) -> Result<()> {
        let mut writer = ModelWriter::new(writer);
        writer.write_len(self.weights.len())?;
        writer.write_f64s(&self.weights)?;
        writer.write_f64(self.bias)?;
        writer.finish()?;
        Ok(())
    }

    fn read_from(&mut self, reader: &mut dyn Read) -> Result<()> {
        let mut reader = ModelReader::new(reader);
        let num_features = reader.read_len()?;
        if num_features != self.weights.len() {
            return Err(SentiraError::dimension_mismatch(
                format!("{} features", self.weights.len()),
                format!("{num_features} features"),
            ));
        }

        let weights = reader.read_f64s(num_features)?;
        let bias = reader.read_f64()?;
        reader.finish()?;

        self.weights = weights;
        self.bias = bias;
        Ok(())
    }
}
