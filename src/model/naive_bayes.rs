//! Multinomial Naive Bayes over bag-of-words tokens.
//!
//! Each class keeps a log-prior and a table of Laplace-smoothed token
//! log-likelihoods. Scoring sums the log-likelihoods of the tokens found in a
//! class's table; tokens outside the training vocabulary add nothing.

use std::collections::BTreeMap;
use std::io::{Read, Write};

use ahash::{AHashMap, AHashSet};
use log::{debug, info};

use crate::analysis::analyzer::preprocessor::TextPreprocessor;
use crate::config::NaiveBayesConfig;
use crate::dataset::{Dataset, Sentiment};
use crate::error::{Result, SentiraError};
use crate::model::codec::{ModelReader, ModelWriter};
use crate::model::{
    Model, Persistable, Predictable, Trainable, TrainingReport, accuracy, dev_accuracy,
    ensure_trainable, usable_dev,
};
use crate::vocabulary::Vocabulary;

/// Parameters learned for one class.
#[derive(Debug, Clone, PartialEq)]
struct ClassModel {
    log_prior: f64,
    log_likelihood: AHashMap<String, f64>,
}

/// Naive Bayes sentiment classifier.
///
/// Predictions on raw text run through the classifier's own
/// [`TextPreprocessor`], so it must use the same stop words as the corpus it
/// was trained on.
#[derive(Debug, Clone)]
pub struct NaiveBayesClassifier {
    preprocessor: TextPreprocessor,
    classes: BTreeMap<Sentiment, ClassModel>,
}

impl NaiveBayesClassifier {
    /// Create an untrained classifier.
    pub fn new(preprocessor: TextPreprocessor) -> Self {
        NaiveBayesClassifier {
            preprocessor,
            classes: BTreeMap::new(),
        }
    }

    /// Whether the classifier holds trained parameters.
    pub fn is_trained(&self) -> bool {
        !self.classes.is_empty()
    }

    /// Labels the classifier can predict, in label order.
    pub fn classes(&self) -> impl Iterator<Item = Sentiment> + '_ {
        self.classes.keys().copied()
    }

    pub fn log_prior(&self, label: Sentiment) -> Option<f64> {
        self.classes.get(&label).map(|c| c.log_prior)
    }

    pub fn log_likelihood(&self, label: Sentiment, token: &str) -> Option<f64> {
        self.classes
            .get(&label)
            .and_then(|c| c.log_likelihood.get(token).copied())
    }

    pub fn preprocessor(&self) -> &TextPreprocessor {
        &self.preprocessor
    }

    /// Fit the class tables to `dataset` with additive smoothing `laplace`.
    ///
    /// Any previous parameters are discarded.
    pub fn fit(&mut self, dataset: &Dataset, laplace: f64) -> Result<()> {
        NaiveBayesConfig { laplace }.validate()?;
        ensure_trainable(dataset, self.name())?;

        let mut word_counts: BTreeMap<Sentiment, AHashMap<&str, usize>> = BTreeMap::new();
        let mut total_words: BTreeMap<Sentiment, usize> = BTreeMap::new();
        let mut sample_counts: BTreeMap<Sentiment, usize> = BTreeMap::new();
        let mut token_set: AHashSet<&str> = AHashSet::new();

        for sample in dataset {
            let label = sample.label();
            *sample_counts.entry(label).or_insert(0) += 1;
            let counts = word_counts.entry(label).or_default();
            let total = total_words.entry(label).or_insert(0);

            for token in sample.tokens() {
                token_set.insert(token.as_str());
                *counts.entry(token.as_str()).or_insert(0) += 1;
                *total += 1;
            }
        }

        let vocabulary_size = token_set.len() as f64;
        let total_samples = dataset.len() as f64;
        let mut classes = BTreeMap::new();

        for (&label, &samples) in &sample_counts {
            let counts = word_counts.get(&label);
            let total = total_words.get(&label).copied().unwrap_or(0) as f64;
            let denominator = total + vocabulary_size * laplace;

            let log_likelihood = token_set
                .iter()
                .map(|&token| {
                    let count = counts.and_then(|c| c.get(token)).copied().unwrap_or(0) as f64;
                    (token.to_string(), ((count + laplace) / denominator).ln())
                })
                .collect();

            classes.insert(
                label,
                ClassModel {
                    log_prior: (samples as f64 / total_samples).ln(),
                    log_likelihood,
                },
            );

            debug!(
                "naive_bayes class {label}: {samples} samples, {} tokens",
                total as usize
            );
        }

        self.classes = classes;
        info!(
            "naive_bayes trained on {} samples, {} classes, {} distinct tokens",
            dataset.len(),
            self.classes.len(),
            token_set.len()
        );
        Ok(())
    }

    /// Predict the sentiment of raw text.
    pub fn predict(&self, text: &str) -> Result<Sentiment> {
        let tokens = self.preprocessor.preprocess(text)?;
        self.classify(&tokens)
    }

    /// Score preprocessed tokens against every trained class.
    ///
    /// Ties go to Positive, then Negative, then Neutral.
    pub fn classify(&self, tokens: &[String]) -> Result<Sentiment> {
        let mut best: Option<(Sentiment, f64)> = None;

        for label in Sentiment::TIE_BREAK_ORDER {
            let Some(class) = self.classes.get(&label) else {
                continue;
            };

            let score = tokens.iter().fold(class.log_prior, |score, token| {
                score + class.log_likelihood.get(token).copied().unwrap_or(0.0)
            });

            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((label, score)),
            }
        }

        best.map(|(label, _)| label)
            .ok_or_else(|| SentiraError::not_trained("naive_bayes has no class tables"))
    }
}

impl Default for NaiveBayesClassifier {
    fn default() -> Self {
        Self::new(TextPreprocessor::default())
    }
}

impl Model for NaiveBayesClassifier {
    fn name(&self) -> &'static str {
        "naive_bayes"
    }
}

impl Trainable for NaiveBayesClassifier {
    type Config = NaiveBayesConfig;

    fn train(
        &mut self,
        dataset: &Dataset,
        vocabulary: &Vocabulary,
        dev: Option<&Dataset>,
        config: &Self::Config,
    ) -> Result<TrainingReport> {
        self.fit(dataset, config.laplace)?;
        let dev = usable_dev(dev, self.name());

        let mut report = TrainingReport::new(self.name());
        report.dev_accuracy = dev_accuracy(&*self, dev, vocabulary)?;
        if let Some(accuracy) = report.dev_accuracy {
            info!("naive_bayes dev_accuracy={accuracy:.2}%");
        }
        Ok(report)
    }
}

impl Predictable for NaiveBayesClassifier {
    fn predict_tokens(&self, tokens: &[String], _vocabulary: &Vocabulary) -> Result<Sentiment> {
        self.classify(tokens)
    }

    /// Re-joins each sample's tokens into text and predicts on that text.
    fn evaluate(&self, dataset: &Dataset, _vocabulary: &Vocabulary) -> Result<f64> {
        if dataset.is_empty() {
            return Err(SentiraError::empty_dataset(
                "cannot evaluate naive_bayes on an empty dataset",
            ));
        }

        let mut correct = 0;
        for sample in dataset {
            if self.predict(&sample.tokens().join(" "))? == sample.label() {
                correct += 1;
            }
        }

        accuracy(correct, dataset.len())
    }
}

impl Persistable for NaiveBayesClassifier {
    fn write_to(&self, writer: &mut dyn Write) -> Result<()> {
        if !self.is_trained() {
            return Err(SentiraError::not_trained("cannot save untrained naive_bayes"));
        }

        let mut writer = ModelWriter::new(writer);
        writer.write_len(self.classes.len())?;

        for (label, class) in &self.classes {
            writer.write_u8(label.code())?;
            writer.write_f64(class.log_prior)?;
            writer.write_len(class.log_likelihood.len())?;

            let mut entries: Vec<(&String, &f64)> = class.log_likelihood.iter().collect();
            entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
            for (token, &value) in entries {
                writer.write_string(token)?;
                writer.write_f64(value)?;
            }
        }

        writer.finish()?;
        Ok(())
    }

    fn read_from(&mut self, reader: &mut dyn Read) -> Result<()> {
        let mut reader = ModelReader::new(reader);
        let class_count = reader.read_len()?;
        if class_count == 0 {
            return Err(SentiraError::not_trained("snapshot holds no classes"));
        }
        if class_count > Sentiment::ALL.len() {
            return Err(SentiraError::corrupted(format!(
                "snapshot holds {class_count} classes"
            )));
        }

        let mut classes = BTreeMap::new();
        for _ in 0..class_count {
            let label = Sentiment::from_code(reader.read_u8()?)
                .map_err(|e| SentiraError::corrupted(e.to_string()))?;
            let log_prior = reader.read_f64()?;
            let entry_count = reader.read_len()?;

            let mut log_likelihood = AHashMap::with_capacity(entry_count.min(1 << 16));
            for _ in 0..entry_count {
                let token = reader.read_string()?;
                let value = reader.read_f64()?;
                log_likelihood.insert(token, value);
            }

            let class = ClassModel {
                log_prior,
                log_likelihood,
            };
            if classes.insert(label, class).is_some() {
                return Err(SentiraError::corrupted(format!(
                    "duplicate class {label} in snapshot"
                )));
            }
        }
        reader.finish()?;

        self.classes = classes;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn classifier() -> NaiveBayesClassifier {
        NaiveBayesClassifier::new(TextPreprocessor::from_stopwords(vec!["the", "a"]))
    }

    fn dataset() -> Dataset {
        let mut dataset = Dataset::new();
        dataset.add_sample(tokens(&["love", "game"]), Sentiment::Positive);
        dataset.add_sample(tokens(&["hate", "lag"]), Sentiment::Negative);
        dataset
    }

    #[test]
    fn test_smoothed_tables() {
        let mut model = classifier();
        model.fit(&dataset(), 1.0).unwrap();

        // 2 words per class, 4 distinct tokens: denominator 2 + 4
        let seen = (2.0f64 / 6.0).ln();
        let unseen = (1.0f64 / 6.0).ln();
        assert_eq!(model.log_likelihood(Sentiment::Positive, "love"), Some(seen));
        assert_eq!(model.log_likelihood(Sentiment::Positive, "hate"), Some(unseen));
        assert_eq!(model.log_likelihood(Sentiment::Negative, "lag"), Some(seen));
        assert_eq!(model.log_prior(Sentiment::Positive), Some(0.5f64.ln()));
        assert_eq!(model.log_prior(Sentiment::Neutral), None);
        assert_eq!(
            model.classes().collect::<Vec<_>>(),
            vec![Sentiment::Negative, Sentiment::Positive]
        );
    }

    #[test]
    fn test_disjoint_corpus_is_fully_separated() {
        let mut model = classifier();
        let dataset = dataset();
        let vocabulary = dataset.create_vocabulary();
        model
            .train(&dataset, &vocabulary, None, &NaiveBayesConfig::default())
            .unwrap();

        assert_eq!(model.evaluate(&dataset, &vocabulary).unwrap(), 100.0);
        assert_eq!(model.predict("I LOVE the game!").unwrap(), Sentiment::Positive);
        assert_eq!(model.predict("hate this lag").unwrap(), Sentiment::Negative);
    }

    #[test]
    fn test_unknown_tokens_contribute_nothing() {
        let mut model = classifier();
        model.fit(&dataset(), 1.0).unwrap();

        // equal priors and no known tokens: a tie, which Positive wins
        assert_eq!(
            model.classify(&tokens(&["zzz", "qqq"])).unwrap(),
            Sentiment::Positive
        );
        assert_eq!(model.classify(&[]).unwrap(), Sentiment::Positive);
    }

    #[test]
    fn test_tie_break_prefers_negative_over_neutral() {
        let mut dataset = Dataset::new();
        dataset.add_sample(tokens(&["meh"]), Sentiment::Neutral);
        dataset.add_sample(tokens(&["meh"]), Sentiment::Negative);

        let mut model = classifier();
        model.fit(&dataset, 1.0).unwrap();
        assert_eq!(model.classify(&tokens(&["meh"])).unwrap(), Sentiment::Negative);
    }

    #[test]
    fn test_retraining_replaces_state() {
        let mut model = classifier();
        model.fit(&dataset(), 1.0).unwrap();

        let mut other = Dataset::new();
        other.add_sample(tokens(&["calm"]), Sentiment::Neutral);
        model.fit(&other, 1.0).unwrap();

        assert_eq!(model.classes().collect::<Vec<_>>(), vec![Sentiment::Neutral]);
        assert_eq!(model.log_likelihood(Sentiment::Neutral, "love"), None);
        assert_eq!(model.log_prior(Sentiment::Neutral), Some(0.0));
    }

    #[test]
    fn test_untrained_and_invalid_input() {
        let mut model = classifier();
        assert!(matches!(
            model.predict("hello"),
            Err(SentiraError::ModelNotTrained(_))
        ));
        assert!(matches!(
            model.fit(&Dataset::new(), 1.0),
            Err(SentiraError::EmptyDataset(_))
        ));
        assert!(matches!(
            model.fit(&dataset(), 0.0),
            Err(SentiraError::Config(_))
        ));

        model.fit(&dataset(), 1.0).unwrap();
        assert!(matches!(
            model.evaluate(&Dataset::new(), &Vocabulary::new()),
            Err(SentiraError::EmptyDataset(_))
        ));
    }

    #[test]
    fn test_write_read() {
        let mut model = classifier();
        model.fit(&dataset(), 0.5).unwrap();

        let mut buffer = Vec::new();
        model.write_to(&mut buffer).unwrap();

        let mut restored = classifier();
        restored.read_from(&mut buffer.as_slice()).unwrap();
        assert_eq!(restored.classes, model.classes);

        let mut again = Vec::new();
        restored.write_to(&mut again).unwrap();
        assert_eq!(again, buffer);
    }

    #[test]
    fn test_failed_read_keeps_state() {
        let mut model = classifier();
        model.fit(&dataset(), 1.0).unwrap();
        let before = model.classes.clone();

        let mut buffer = Vec::new();
        model.write_to(&mut buffer).unwrap();
        buffer.truncate(buffer.len() - 3);

        let mut empty = Vec::new();
        ModelWriter::new(&mut empty).write_len(0).unwrap();

        assert!(model.read_from(&mut buffer.as_slice()).is_err());
        assert!(model.read_from(&mut empty.as_slice()).is_err());
        assert_eq!(model.classes, before);
    }
}
