//! Labeled samples and the datasets that hold them.
//!
//! A [`Dataset`] is filled once by a loader (see [`crate::corpus`]) through
//! [`Dataset::add_sample`] and is read-only afterwards: vocabulary
//! construction and every model's train/evaluate take `&Dataset`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SentiraError};
use crate::vocabulary::Vocabulary;

/// Sentiment label.
///
/// The integer encoding is fixed crate-wide: `0 = Negative`, `1 = Positive`,
/// `2 = Neutral`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sentiment {
    Negative,
    Positive,
    Neutral,
}

impl Sentiment {
    /// All labels in encoding order.
    pub const ALL: [Sentiment; 3] = [Sentiment::Negative, Sentiment::Positive, Sentiment::Neutral];

    /// Order in which tied scores are resolved: the first label wins.
    pub const TIE_BREAK_ORDER: [Sentiment; 3] =
        [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral];

    /// Integer code of this label.
    pub fn code(self) -> u8 {
        match self {
            Sentiment::Negative => 0,
            Sentiment::Positive => 1,
            Sentiment::Neutral => 2,
        }
    }

    /// Parse an integer code back into a label.
    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            0 => Ok(Sentiment::Negative),
            1 => Ok(Sentiment::Positive),
            2 => Ok(Sentiment::Neutral),
            other => Err(SentiraError::other(format!(
                "Unknown sentiment code: {other}"
            ))),
        }
    }

    /// Binary target used by the logistic regression and the network.
    pub fn binary_target(self) -> f64 {
        if self == Sentiment::Positive { 1.0 } else { 0.0 }
    }

    /// Signed target used by the hinge-loss classifier.
    pub fn signed_target(self) -> f64 {
        if self == Sentiment::Positive { 1.0 } else { -1.0 }
    }

    /// Lowercase label name.
    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Negative => "negative",
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = SentiraError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "negative" => Ok(Sentiment::Negative),
            "positive" => Ok(Sentiment::Positive),
            "neutral" => Ok(Sentiment::Neutral),
            other => Err(SentiraError::other(format!("Unknown sentiment: {other}"))),
        }
    }
}

/// A preprocessed post and its label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    tokens: Vec<String>,
    label: Sentiment,
}

impl Sample {
    /// Create a new sample.
    pub fn new(tokens: Vec<String>, label: Sentiment) -> Self {
        Sample { tokens, label }
    }

    /// Tokens of this sample, in text order.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Label of this sample.
    pub fn label(&self) -> Sentiment {
        self.label
    }
}

/// An insertion-ordered collection of samples.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    samples: Vec<Sample>,
}

impl Dataset {
    /// Create an empty dataset.
    pub fn new() -> Self {
        Dataset {
            samples: Vec::new(),
        }
    }

    /// Append a sample.
    pub fn add_sample(&mut self, tokens: Vec<String>, label: Sentiment) {
        self.samples.push(Sample::new(tokens, label));
    }

    /// All samples in insertion order.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Iterate over samples in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the dataset holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Number of samples carrying `label`.
    pub fn count_label(&self, label: Sentiment) -> usize {
        self.samples.iter().filter(|s| s.label == label).count()
    }

    /// Build a vocabulary from every token of this dataset, in first-seen order.
    pub fn create_vocabulary(&self) -> Vocabulary {
        Vocabulary::from_dataset(self)
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_add_sample_preserves_order() {
        let mut dataset = Dataset::new();
        assert!(dataset.is_empty());

        dataset.add_sample(tokens(&["good", "game"]), Sentiment::Positive);
        dataset.add_sample(tokens(&["bad"]), Sentiment::Negative);

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.samples()[0].tokens(), &["good", "game"]);
        assert_eq!(dataset.samples()[0].label(), Sentiment::Positive);
        assert_eq!(dataset.samples()[1].label(), Sentiment::Negative);
        assert_eq!(dataset.iter().count(), 2);
        assert_eq!(dataset.count_label(Sentiment::Positive), 1);
        assert_eq!(dataset.count_label(Sentiment::Neutral), 0);
    }

    #[test]
    fn test_sentiment_codes() {
        for label in Sentiment::ALL {
            assert_eq!(Sentiment::from_code(label.code()).unwrap(), label);
        }
        assert_eq!(Sentiment::Negative.code(), 0);
        assert_eq!(Sentiment::Positive.code(), 1);
        assert_eq!(Sentiment::Neutral.code(), 2);
        assert!(Sentiment::from_code(3).is_err());
    }

    #[test]
    fn test_sentiment_parsing() {
        assert_eq!("Positive".parse::<Sentiment>().unwrap(), Sentiment::Positive);
        assert_eq!(" negative ".parse::<Sentiment>().unwrap(), Sentiment::Negative);
        assert_eq!("NEUTRAL".parse::<Sentiment>().unwrap(), Sentiment::Neutral);
        assert!("Irrelevant".parse::<Sentiment>().is_err());
        assert_eq!(Sentiment::Positive.to_string(), "positive");
    }

    #[test]
    fn test_targets() {
        assert_eq!(Sentiment::Positive.binary_target(), 1.0);
        assert_eq!(Sentiment::Negative.binary_target(), 0.0);
        assert_eq!(Sentiment::Neutral.binary_target(), 0.0);
        assert_eq!(Sentiment::Positive.signed_target(), 1.0);
        assert_eq!(Sentiment::Negative.signed_target(), -1.0);
    }
}
