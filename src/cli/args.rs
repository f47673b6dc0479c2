//! Command line argument parsing for the Sentira CLI using clap.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// Sentira - Sentiment classification for short social-media posts
#[derive(Parser, Debug, Clone)]
#[command(name = "sentira")]
#[command(about = "Train, evaluate and run sentiment classifiers on tweet corpora")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "Sentira Contributors")]
#[command(long_about = None)]
pub struct SentiraArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl SentiraArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Train a model on a labeled corpus and save its weights
    Train(TrainArgs),

    /// Measure the accuracy of saved weights on a labeled corpus
    Evaluate(EvaluateArgs),

    /// Predict the sentiment of a piece of text
    Predict(PredictArgs),
}

/// The four classifiers.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModelKind {
    /// Multinomial Naive Bayes
    NaiveBayes,
    /// Logistic regression
    Logistic,
    /// Linear SVM (hinge loss)
    Svm,
    /// Two-layer neural network
    Network,
}

/// Arguments for training
#[derive(Parser, Debug, Clone)]
pub struct TrainArgs {
    /// Model to train
    #[arg(short, long, value_enum)]
    pub model: ModelKind,

    /// Training corpus (CSV: id,entity,sentiment,text)
    #[arg(long, value_name = "CSV")]
    pub train: PathBuf,

    /// Development corpus reported after every epoch
    #[arg(long, value_name = "CSV")]
    pub dev: Option<PathBuf>,

    /// Newline-delimited stop word list
    #[arg(short, long, value_name = "FILE")]
    pub stopwords: PathBuf,

    /// Where to write the weights; the vocabulary goes to `<OUTPUT>.vocab`
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Hyperparameter file (JSON)
    #[arg(short, long, value_name = "JSON")]
    pub config: Option<PathBuf>,

    /// Maximum number of samples to load from each corpus (0 = no limit)
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Keep samples labeled Neutral
    #[arg(long)]
    pub include_neutral: bool,
}

/// Arguments for evaluation
#[derive(Parser, Debug, Clone)]
pub struct EvaluateArgs {
    /// Model the weights belong to
    #[arg(short, long, value_enum)]
    pub model: ModelKind,

    /// Saved weights
    #[arg(short, long, value_name = "WEIGHTS")]
    pub weights: PathBuf,

    /// Labeled corpus to evaluate on
    #[arg(short, long, value_name = "CSV")]
    pub data: PathBuf,

    /// Newline-delimited stop word list
    #[arg(short, long, value_name = "FILE")]
    pub stopwords: PathBuf,

    /// Hyperparameter file (JSON)
    #[arg(short, long, value_name = "JSON")]
    pub config: Option<PathBuf>,

    /// Maximum number of samples to load (0 = no limit)
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Keep samples labeled Neutral
    #[arg(long)]
    pub include_neutral: bool,
}

/// Arguments for prediction
#[derive(Parser, Debug, Clone)]
pub struct PredictArgs {
    /// Model the weights belong to
    #[arg(short, long, value_enum)]
    pub model: ModelKind,

    /// Saved weights
    #[arg(short, long, value_name = "WEIGHTS")]
    pub weights: PathBuf,

    /// Newline-delimited stop word list
    #[arg(short, long, value_name = "FILE")]
    pub stopwords: PathBuf,

    /// Hyperparameter file (JSON)
    #[arg(short, long, value_name = "JSON")]
    pub config: Option<PathBuf>,

    /// Text to classify
    #[arg(value_name = "TEXT")]
    pub text: String,
}

/// Output formats available in CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

/// Path of the vocabulary saved next to `weights`.
pub fn vocabulary_path(weights: &Path) -> PathBuf {
    let mut path = weights.as_os_str().to_owned();
    path.push(".vocab");
    PathBuf::from(path)
}
