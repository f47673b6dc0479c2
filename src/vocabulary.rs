//! Token-to-index vocabulary and bag-of-words vectorization.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use ahash::AHashMap;
use log::{debug, info};

use crate::dataset::Dataset;
use crate::error::Result;

/// Maps every token of a training set to a contiguous zero-based index.
///
/// Indices are assigned in first-seen order while walking the samples in
/// dataset order, so the same dataset always yields the same vocabulary.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    index: AHashMap<String, usize>,
    tokens: Vec<String>,
}

impl std::fmt::Debug for Vocabulary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vocabulary")
            .field("size", &self.tokens.len())
            .finish()
    }
}

impl Vocabulary {
    /// Create an empty vocabulary.
    pub fn new() -> Self {
        Vocabulary {
            index: AHashMap::new(),
            tokens: Vec::new(),
        }
    }

    /// Build a vocabulary from every token of `dataset`.
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let mut vocabulary = Vocabulary::new();
        for sample in dataset {
            for token in sample.tokens() {
                vocabulary.insert(token);
            }
        }

        debug!(
            "Built vocabulary of {} tokens from {} samples",
            vocabulary.len(),
            dataset.len()
        );
        vocabulary
    }

    /// Build a vocabulary from tokens in index order. Duplicates keep their
    /// first index.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut vocabulary = Vocabulary::new();
        for token in tokens {
            vocabulary.insert(token.as_ref());
        }
        vocabulary
    }

    fn insert(&mut self, token: &str) {
        if !self.index.contains_key(token) {
            self.index.insert(token.to_string(), self.tokens.len());
            self.tokens.push(token.to_string());
        }
    }

    /// Number of distinct tokens, i.e. the feature dimensionality.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Index of `token`, if it is in the vocabulary.
    pub fn index_of(&self, token: &str) -> Option<usize> {
        self.index.get(token).copied()
    }

    /// Token stored at `index`.
    pub fn token(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(String::as_str)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.index.contains_key(token)
    }

    /// Iterate over `(index, token)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.tokens.iter().map(String::as_str).enumerate()
    }

    /// Term-frequency vector of `tokens`. Unknown tokens are ignored.
    pub fn vectorize(&self, tokens: &[String]) -> Vec<f64> {
        let mut features = vec![0.0; self.tokens.len()];
        for token in tokens {
            if let Some(&idx) = self.index.get(token.as_str()) {
                features[idx] += 1.0;
            }
        }
        features
    }

    /// Write one token per line in index order.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        for token in &self.tokens {
            writeln!(writer, "{token}")?;
        }
        Ok(())
    }

    /// Read a vocabulary written by [`Vocabulary::write_to`].
    pub fn read_from<R: Read>(reader: R) -> Result<Self> {
        let mut vocabulary = Vocabulary::new();
        for line in BufReader::new(reader).lines() {
            let line = line?;
            let token = line.trim_end();
            if !token.is_empty() {
                vocabulary.insert(token);
            }
        }
        Ok(vocabulary)
    }

    /// Save the vocabulary to `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(&mut writer)?;
        writer.flush()?;

        info!("Saved vocabulary of {} tokens to {}", self.len(), path.display());
        Ok(())
    }

    /// Load a vocabulary from `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let vocabulary = Self::read_from(File::open(path)?)?;

        info!(
            "Loaded vocabulary of {} tokens from {}",
            vocabulary.len(),
            path.display()
        );
        Ok(vocabulary)
    }
}
