//! Linear support vector machine trained by sub-gradient descent on the
//! L2-regularized hinge loss.
//!
//! Positive samples map to `+1`, every other label to `-1`. Snapshots are the
//! raw weights followed by the bias with no header, so loading checks the
//! file length against the in-memory weight count.

use std::io::{Read, Write};

use log::debug;

use crate::config::SvmConfig;
use crate::dataset::{Dataset, Sentiment};
use crate::error::{Result, SentiraError};
use crate::model::codec::{F64_SIZE, ModelReader, ModelWriter};
use crate::model::{
    Model, Persistable, Predictable, Trainable, TrainingReport, dev_accuracy, dot,
    ensure_trainable, usable_dev,
};
use crate::vocabulary::Vocabulary;

/// Hinge-loss linear classifier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SvmClassifier {
    weights: Vec<f64>,
    bias: f64,
}

impl SvmClassifier {
    /// Create an empty classifier. Weights are sized when training starts.
    pub fn new() -> Self {
        SvmClassifier {
            weights: Vec::new(),
            bias: 0.0,
        }
    }

    /// Create a zero-initialized classifier with `dimension` weights, ready
    /// to load a snapshot.
    pub fn with_dimension(dimension: usize) -> Self {
        SvmClassifier {
            weights: vec![0.0; dimension],
            bias: 0.0,
        }
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    /// Signed distance-like score `w·x + b`.
    pub fn decision_function(&self, features: &[f64]) -> f64 {
        dot(&self.weights, features) + self.bias
    }

    /// Apply one sub-gradient step for a sample with label `y` in `{-1, +1}`.
    ///
    /// A sample already outside the margin only shrinks the weights; the bias
    /// moves only on margin violations.
    pub fn update_weights(
        &mut self,
        features: &[f64],
        y: f64,
        learning_rate: f64,
        regularization: f64,
    ) {
        let margin = y * self.decision_function(features);

        if margin >= 1.0 {
            for weight in &mut self.weights {
                *weight -= learning_rate * regularization * *weight;
            }
        } else {
            for (weight, feature) in self.weights.iter_mut().zip(features) {
                *weight += learning_rate * (y * feature - regularization * *weight);
            }
            self.bias += learning_rate * y;
        }
    }

    /// Hinge loss of a sample under the current parameters.
    pub fn hinge_loss(&self, features: &[f64], y: f64) -> f64 {
        (1.0 - y * self.decision_function(features)).max(0.0)
    }

    fn check_dimension(&self, vocabulary: &Vocabulary) -> Result<()> {
        if vocabulary.len() == self.weights.len() {
            Ok(())
        } else {
            Err(SentiraError::dimension_mismatch(
                format!("{} weights", self.weights.len()),
                format!("{} vocabulary tokens", vocabulary.len()),
            ))
        }
    }
}

impl Model for SvmClassifier {
    fn name(&self) -> &'static str {
        "svm"
    }
}

impl Trainable for SvmClassifier {
    type Config = SvmConfig;

    fn train(
        &mut self,
        dataset: &Dataset,
        vocabulary: &Vocabulary,
        dev: Option<&Dataset>,
        config: &Self::Config,
    ) -> Result<TrainingReport> {
        config.validate()?;
        ensure_trainable(dataset, self.name())?;
        self.weights.resize(vocabulary.len(), 0.0);
        let dev = usable_dev(dev, self.name());

        debug!(
            "svm: {} samples, {} features, lambda={}",
            dataset.len(),
            vocabulary.len(),
            config.regularization
        );

        let mut report = TrainingReport::new(self.name());
        for epoch in 1..=config.epochs {
            let mut total_loss = 0.0;
            for sample in dataset {
                let features = vocabulary.vectorize(sample.tokens());
                let y = sample.label().signed_target();

                self.update_weights(&features, y, config.learning_rate, config.regularization);
                total_loss += self.hinge_loss(&features, y);
            }

            let accuracy = dev_accuracy(&*self, dev, vocabulary)?;
            report.push_epoch(epoch, config.epochs, total_loss, accuracy);
        }

        Ok(report)
    }
}

impl Predictable for SvmClassifier {
    fn predict_tokens(&self, tokens: &[String], vocabulary: &Vocabulary) -> Result<Sentiment> {
        self.check_dimension(vocabulary)?;
        let features = vocabulary.vectorize(tokens);

        if self.decision_function(&features) >= 0.0 {
            Ok(Sentiment::Positive)
        } else {
            Ok(Sentiment::Negative)
        }
    }
}

impl Persistable for SvmClassifier {
    fn write_to(&self, writer: &mut dyn Write) -> Result<()> {
        let mut writer = ModelWriter::new(writer);
        writer.write_f64s(&self.weights)?;
        writer.write_f64(self.bias)?;
        writer.finish()?;
        Ok(())
    }

    fn read_from(&mut self, reader: &mut dyn Read) -> Result<()> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;

        let expected = (self.weights.len() + 1) * F64_SIZE;
        if bytes.len() != expected {
            let found = if bytes.len() % F64_SIZE == 0 && !bytes.is_empty() {
                format!("{} weights", bytes.len() / F64_SIZE - 1)
            } else {
                format!("{} bytes", bytes.len())
            };
            return Err(SentiraError::dimension_mismatch(
                format!("{} weights", self.weights.len()),
                found,
            ));
        }

        let mut reader = ModelReader::new(bytes.as_slice());
        let weights = reader.read_f64s(self.weights.len())?;
        let bias = reader.read_f64()?;
        reader.finish()?;

        self.weights = weights;
        self.bias = bias;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn dataset() -> Dataset {
        let mut dataset = Dataset::new();
        dataset.add_sample(tokens(&["love", "it"]), Sentiment::Positive);
        dataset.add_sample(tokens(&["broken", "it"]), Sentiment::Negative);
        dataset.add_sample(tokens(&["love", "love"]), Sentiment::Positive);
        dataset.add_sample(tokens(&["broken", "refund"]), Sentiment::Negative);
        dataset
    }

    #[test]
    fn test_margin_satisfied_only_regularizes() {
        let mut model = SvmClassifier::with_dimension(2);
        model.weights = vec![2.0, -1.0];
        model.bias = 0.5;

        // margin = 1 * (2 + 0.5) = 2.5 >= 1
        model.update_weights(&[1.0, 0.0], 1.0, 0.1, 0.5);

        assert_eq!(model.bias(), 0.5);
        assert_eq!(model.weights(), &[2.0 - 0.1 * 0.5 * 2.0, -1.0 - 0.1 * 0.5 * -1.0]);
    }

    #[test]
    fn test_margin_violation_moves_toward_label() {
        let mut model = SvmClassifier::with_dimension(2);
        model.update_weights(&[1.0, 2.0], -1.0, 0.1, 0.01);

        assert_eq!(model.bias(), -0.1);
        assert_eq!(model.weights(), &[-0.1, -0.2]);
        assert!((model.hinge_loss(&[1.0, 2.0], -1.0) - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_train_sizes_weights_and_separates() {
        let dataset = dataset();
        let vocabulary = dataset.create_vocabulary();
        let mut model = SvmClassifier::new();

        let config = SvmConfig {
            learning_rate: 0.1,
            epochs: 20,
            regularization: 0.01,
        };
        let report = model
            .train(&dataset, &vocabulary, Some(&dataset), &config)
            .unwrap();

        assert_eq!(model.weights().len(), vocabulary.len());
        assert_eq!(report.epochs.len(), 20);
        assert_eq!(report.dev_accuracy, Some(100.0));
        assert_eq!(
            model.predict_tokens(&tokens(&["love"]), &vocabulary).unwrap(),
            Sentiment::Positive
        );
        assert_eq!(
            model.predict_tokens(&tokens(&["broken"]), &vocabulary).unwrap(),
            Sentiment::Negative
        );
    }

    #[test]
    fn test_zero_model_predicts_positive() {
        let vocabulary = Vocabulary::from_tokens(["a", "b"]);
        let model = SvmClassifier::with_dimension(2);
        assert_eq!(
            model.predict_tokens(&tokens(&["a"]), &vocabulary).unwrap(),
            Sentiment::Positive
        );
    }

    #[test]
    fn test_errors() {
        let mut model = SvmClassifier::new();
        let vocabulary = Vocabulary::from_tokens(["a"]);
        assert!(matches!(
            model.train(&Dataset::new(), &vocabulary, None, &SvmConfig::default()),
            Err(SentiraError::EmptyDataset(_))
        ));
        assert!(matches!(
            model.predict_tokens(&tokens(&["a"]), &vocabulary),
            Err(SentiraError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_write_read() {
        let mut model = SvmClassifier::with_dimension(3);
        model.weights = vec![0.5, -0.25, 1.5];
        model.bias = -0.75;

        let mut buffer = Vec::new();
        model.write_to(&mut buffer).unwrap();
        assert_eq!(buffer.len(), 32);

        let mut restored = SvmClassifier::with_dimension(3);
        restored.read_from(&mut buffer.as_slice()).unwrap();
        assert_eq!(restored, model);
    }

    #[test]
    fn test_length_mismatch_reports_counts() {
        let mut buffer = Vec::new();
        SvmClassifier::with_dimension(5).write_to(&mut buffer).unwrap();

        let mut model = SvmClassifier::with_dimension(3);
        model.weights = vec![1.0, 2.0, 3.0];

        match model.read_from(&mut buffer.as_slice()).unwrap_err() {
            SentiraError::DimensionMismatch { expected, found } => {
                assert_eq!(expected, "3 weights");
                assert_eq!(found, "5 weights");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(model.weights(), &[1.0, 2.0, 3.0]);

        let mut short = &buffer[..11];
        assert!(matches!(
            model.read_from(&mut short),
            Err(SentiraError::DimensionMismatch { .. })
        ));
    }
}
