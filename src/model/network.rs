//! A two-layer feed-forward network: `input -> hidden (ReLU) -> 1 (sigmoid)`.
//!
//! Trained one sample at a time by backpropagating the squared error. The
//! output layer is updated first and the hidden-layer error is computed from
//! the already-updated output weights.

use std::io::{Read, Write};

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

use crate::config::NetworkConfig;
use crate::dataset::{Dataset, Sentiment};
use crate::error::{Result, SentiraError};
use crate::model::codec::{ModelReader, ModelWriter};
use crate::model::{
    Model, Persistable, Predictable, Trainable, TrainingReport, dev_accuracy, dot,
    ensure_trainable, sigmoid, usable_dev,
};
use crate::vocabulary::Vocabulary;

fn relu(x: f64) -> f64 {
    x.max(0.0)
}

fn relu_derivative(activation: f64) -> f64 {
    if activation > 0.0 { 1.0 } else { 0.0 }
}

/// Binary classifier with one ReLU hidden layer.
#[derive(Debug, Clone, PartialEq)]
pub struct TwoLayerNetwork {
    input_size: usize,
    hidden_size: usize,
    /// Row-major `hidden_size x input_size` matrix.
    weights_input_hidden: Vec<f64>,
    bias_hidden: Vec<f64>,
    weights_hidden_output: Vec<f64>,
    bias_output: f64,
}

impl TwoLayerNetwork {
    /// Create a network with He-initialized weights from a random seed.
    pub fn new(input_size: usize, hidden_size: usize) -> Self {
        let seed: u64 = rand::rng().random();
        debug!("network initialization seed: {seed}");
        Self::with_seed(input_size, hidden_size, seed)
    }

    /// Create a network with He-initialized weights drawn from `seed`.
    ///
    /// Weights are `N(0, 1) * sqrt(2 / fan_in)`; biases start at zero.
    pub fn with_seed(input_size: usize, hidden_size: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let input_scale = (2.0 / input_size as f64).sqrt();
        let hidden_scale = (2.0 / hidden_size as f64).sqrt();

        let mut weights_input_hidden = Vec::with_capacity(hidden_size * input_size);
        let mut weights_hidden_output = Vec::with_capacity(hidden_size);
        for _ in 0..hidden_size {
            for _ in 0..input_size {
                let z: f64 = rng.sample(StandardNormal);
                weights_input_hidden.push(z * input_scale);
            }
            let z: f64 = rng.sample(StandardNormal);
            weights_hidden_output.push(z * hidden_scale);
        }

        TwoLayerNetwork {
            input_size,
            hidden_size,
            weights_input_hidden,
            bias_hidden: vec![0.0; hidden_size],
            weights_hidden_output,
            bias_output: 0.0,
        }
    }

    /// Create a network sized for `input_size` features from `config`.
    pub fn from_config(input_size: usize, config: &NetworkConfig) -> Result<Self> {
        config.validate()?;
        Ok(match config.seed {
            Some(seed) => Self::with_seed(input_size, config.hidden_size, seed),
            None => Self::new(input_size, config.hidden_size),
        })
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    pub fn bias_output(&self) -> f64 {
        self.bias_output
    }

    pub fn weights_hidden_output(&self) -> &[f64] {
        &self.weights_hidden_output
    }

    pub fn bias_hidden(&self) -> &[f64] {
        &self.bias_hidden
    }

    /// Weights feeding hidden unit `unit`.
    pub fn hidden_weights(&self, unit: usize) -> Option<&[f64]> {
        self.weights_input_hidden
            .chunks(self.input_size.max(1))
            .nth(unit)
    }

    fn check_input(&self, input: &[f64]) -> Result<()> {
        if input.len() == self.input_size {
            Ok(())
        } else {
            Err(SentiraError::dimension_mismatch(
                format!("{} inputs", self.input_size),
                format!("{} inputs", input.len()),
            ))
        }
    }

    /// Run the network on `input`, returning the output probability and the
    /// hidden activations.
    pub fn forward(&self, input: &[f64]) -> Result<(f64, Vec<f64>)> {
        self.check_input(input)?;

        let hidden: Vec<f64> = (0..self.hidden_size)
            .map(|i| {
                let row = &self.weights_input_hidden[i * self.input_size..(i + 1) * self.input_size];
                relu(self.bias_hidden[i] + dot(input, row))
            })
            .collect();

        let output = sigmoid(self.bias_output + dot(&hidden, &self.weights_hidden_output));
        Ok((output, hidden))
    }

    /// Backpropagate the squared error of one sample and update every
    /// parameter in place.
    pub fn backward(
        &mut self,
        input: &[f64],
        hidden: &[f64],
        output: f64,
        target: f64,
        learning_rate: f64,
    ) -> Result<()> {
        self.check_input(input)?;
        if hidden.len() != self.hidden_size {
            return Err(SentiraError::dimension_mismatch(
                format!("{} hidden activations", self.hidden_size),
                format!("{} hidden activations", hidden.len()),
            ));
        }

        let delta = (output - target) * (output * (1.0 - output));

        for (weight, &h) in self.weights_hidden_output.iter_mut().zip(hidden) {
            *weight -= learning_rate * delta * h;
        }
        self.bias_output -= learning_rate * delta;

        for i in 0..self.hidden_size {
            let error = delta * self.weights_hidden_output[i] * relu_derivative(hidden[i]);
            let row = &mut self.weights_input_hidden[i * self.input_size..(i + 1) * self.input_size];
            for (weight, &x) in row.iter_mut().zip(input) {
                *weight -= learning_rate * error * x;
            }
            self.bias_hidden[i] -= learning_rate * error;
        }

        Ok(())
    }

    /// Classify a feature vector: output >= 0.5 is Positive.
    pub fn predict(&self, input: &[f64]) -> Result<Sentiment> {
        let (output, _) = self.forward(input)?;
        if output >= 0.5 {
            Ok(Sentiment::Positive)
        } else {
            Ok(Sentiment::Negative)
        }
    }

    fn shape_label(input_size: usize, hidden_size: usize) -> String {
        format!("input_size={input_size}, hidden_size={hidden_size}")
    }
}

impl Model for TwoLayerNetwork {
    fn name(&self) -> &'static str {
        "network"
    }
}

impl Trainable for TwoLayerNetwork {
    type Config = NetworkConfig;

    /// `config.hidden_size` must match the network; `config.seed` is only
    /// used by [`TwoLayerNetwork::from_config`].
    fn train(
        &mut self,
        dataset: &Dataset,
        vocabulary: &Vocabulary,
        dev: Option<&Dataset>,
        config: &Self::Config,
    ) -> Result<TrainingReport> {
        config.validate()?;
        if config.hidden_size != self.hidden_size {
            return Err(SentiraError::config(format!(
                "hidden_size {} does not match the network's {}",
                config.hidden_size, self.hidden_size
            )));
        }
        ensure_trainable(dataset, self.name())?;
        if vocabulary.len() != self.input_size {
            return Err(SentiraError::dimension_mismatch(
                format!("{} inputs", self.input_size),
                format!("{} vocabulary tokens", vocabulary.len()),
            ));
        }

        let dev = usable_dev(dev, self.name());

        let samples: Vec<(Vec<f64>, f64)> = dataset
            .iter()
            .map(|s| (vocabulary.vectorize(s.tokens()), s.label().binary_target()))
            .collect();
        debug!(
            "network: {} samples, {} inputs, {} hidden units",
            samples.len(),
            self.input_size,
            self.hidden_size
        );

        let mut report = TrainingReport::new(self.name());
        for epoch in 1..=config.epochs {
            let mut total_loss = 0.0;
            for (features, target) in &samples {
                let (output, hidden) = self.forward(features)?;
                total_loss += (output - target) * (output - target);
                self.backward(features, &hidden, output, *target, config.learning_rate)?;
            }

            let loss = total_loss / samples.len() as f64;
            let accuracy = dev_accuracy(&*self, dev, vocabulary)?;
            report.push_epoch(epoch, config.epochs, loss, accuracy);
        }

        Ok(report)
    }
}

impl Predictable for TwoLayerNetwork {
    fn predict_tokens(&self, tokens: &[String], vocabulary: &Vocabulary) -> Result<Sentiment> {
        self.predict(&vocabulary.vectorize(tokens))
    }
}

impl Persistable for TwoLayerNetwork {
    fn write_to(&self, writer: &mut dyn Write) -> Result<()> {
        let mut writer = ModelWriter::new(writer);
        writer.write_len(self.input_size)?;
        writer.write_len(self.hidden_size)?;
        writer.write_f64s(&self.weights_input_hidden)?;
        writer.write_f64s(&self.bias_hidden)?;
        writer.write_f64s(&self.weights_hidden_output)?;
        writer.write_f64(self.bias_output)?;
        writer.finish()?;
        Ok(())
    }

    fn read_from(&mut self, reader: &mut dyn Read) -> Result<()> {
        let mut reader = ModelReader::new(reader);
        let input_size = reader.read_len()?;
        let hidden_size = reader.read_len()?;
        if input_size != self.input_size || hidden_size != self.hidden_size {
            return Err(SentiraError::dimension_mismatch(
                Self::shape_label(self.input_size, self.hidden_size),
                Self::shape_label(input_size, hidden_size),
            ));
        }

        let weights_input_hidden = reader.read_f64s(hidden_size * input_size)?;
        let bias_hidden = reader.read_f64s(hidden_size)?;
        let weights_hidden_output = reader.read_f64s(hidden_size)?;
        let bias_output = reader.read_f64()?;
        reader.finish()?;

        self.weights_input_hidden = weights_input_hidden;
        self.bias_hidden = bias_hidden;
        self.weights_hidden_output = weights_hidden_output;
        self.bias_output = bias_output;
        Ok(())
    }
}
