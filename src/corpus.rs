//! Loader for labeled tweet corpora.
//!
//! The corpus is a header-less CSV with four columns:
//! ```csv
//! 2401,Borderlands,Positive,"im getting on borderlands and i will murder you all ,"
//! 2402,Borderlands,Negative,the game crashed twice tonight
//! ```
//! Only the sentiment and text columns are used. Unquoted commas inside the
//! text split it into extra fields, which are joined back together. Bytes that
//! are not valid UTF-8 are replaced with U+FFFD instead of failing the load.

use std::borrow::Cow;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use log::{debug, info, warn};

use crate::analysis::analyzer::preprocessor::TextPreprocessor;
use crate::dataset::{Dataset, Sentiment};
use crate::error::Result;

const SENTIMENT_COLUMN: usize = 2;
const TEXT_COLUMN: usize = 3;

/// Reads a tweet corpus into a [`Dataset`], preprocessing every text.
#[derive(Debug, Clone)]
pub struct CorpusLoader {
    preprocessor: TextPreprocessor,
    include_neutral: bool,
    limit: Option<usize>,
}

impl CorpusLoader {
    /// Create a loader that keeps Positive and Negative rows.
    pub fn new(preprocessor: TextPreprocessor) -> Self {
        CorpusLoader {
            preprocessor,
            include_neutral: false,
            limit: None,
        }
    }

    /// Also keep rows labeled Neutral.
    pub fn include_neutral(mut self, include: bool) -> Self {
        self.include_neutral = include;
        self
    }

    /// Stop after `limit` samples have been loaded. A limit of zero means no limit.
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit.filter(|&limit| limit > 0);
        self
    }

    pub fn preprocessor(&self) -> &TextPreprocessor {
        &self.preprocessor
    }

    /// Load the corpus at `path`.
    pub fn load_path<P: AsRef<Path>>(&self, path: P) -> Result<Dataset> {
        let path = path.as_ref();
        let dataset = self.load_reader(File::open(path)?)?;
        info!("Loaded {} samples from {}", dataset.len(), path.display());
        Ok(dataset)
    }

    /// Load a corpus from any reader.
    pub fn load_reader<R: Read>(&self, reader: R) -> Result<Dataset> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut dataset = Dataset::new();
        let mut skipped = 0usize;
        let mut malformed = 0usize;
        let mut lossy = 0usize;

        for record in csv_reader.byte_records() {
            if self.limit.is_some_and(|limit| dataset.len() >= limit) {
                break;
            }

            let record = record?;
            if record.len() <= TEXT_COLUMN {
                malformed += 1;
                continue;
            }

            let sentiment = String::from_utf8_lossy(&record[SENTIMENT_COLUMN]);
            let label = match sentiment.parse::<Sentiment>() {
                Ok(Sentiment::Neutral) if !self.include_neutral => {
                    skipped += 1;
                    continue;
                }
                Ok(label) => label,
                Err(_) => {
                    skipped += 1;
                    continue;
                }
            };

            let fields: Vec<_> = record
                .iter()
                .skip(TEXT_COLUMN)
                .map(String::from_utf8_lossy)
                .collect();
            if fields.iter().any(|field| matches!(field, Cow::Owned(_))) {
                lossy += 1;
            }
            let text = fields.join(",");
            dataset.add_sample(self.preprocessor.preprocess(&text)?, label);
        }

        if skipped > 0 {
            warn!("Skipped {skipped} rows without a usable sentiment label");
        }
        if lossy > 0 {
            warn!("Replaced invalid UTF-8 in {lossy} rows");
        }
        if malformed > 0 {
            warn!("Skipped {malformed} rows with fewer than four columns");
        }
        debug!(
            "Corpus: {} positive, {} negative, {} neutral",
            dataset.count_label(Sentiment::Positive),
            dataset.count_label(Sentiment::Negative),
            dataset.count_label(Sentiment::Neutral)
        );

        Ok(dataset)
    }
}
