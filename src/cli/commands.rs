//! Command implementations for the Sentira CLI.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};

use crate::analysis::analyzer::preprocessor::TextPreprocessor;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::SentiraConfig;
use crate::corpus::CorpusLoader;
use crate::dataset::Dataset;
use crate::model::logistic::LogisticRegression;
use crate::model::naive_bayes::NaiveBayesClassifier;
use crate::model::network::TwoLayerNetwork;
use crate::model::svm::SvmClassifier;
use crate::model::{Persistable, Predictable, Trainable, TrainingReport};
use crate::vocabulary::Vocabulary;

/// Execute a CLI command.
pub fn execute_command(args: SentiraArgs) -> Result<()> {
    match &args.command {
        Command::Train(train_args) => train_model(train_args, &args),
        Command::Evaluate(evaluate_args) => evaluate_model(evaluate_args, &args),
        Command::Predict(predict_args) => predict_text(predict_args, &args),
    }
}

fn load_config(path: Option<&Path>) -> Result<SentiraConfig> {
    match path {
        Some(path) => SentiraConfig::from_path(path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => Ok(SentiraConfig::default()),
    }
}

fn load_preprocessor(path: &Path) -> Result<TextPreprocessor> {
    TextPreprocessor::from_stopword_file(path)
        .with_context(|| format!("failed to read stop words from {}", path.display()))
}

fn load_corpus(loader: &CorpusLoader, path: &Path) -> Result<Dataset> {
    loader
        .load_path(path)
        .with_context(|| format!("failed to load corpus {}", path.display()))
}

/// Train, then persist weights.
fn fit_and_save<M: Trainable + Persistable>(
    mut model: M,
    train: &Dataset,
    vocabulary: &Vocabulary,
    dev: Option<&Dataset>,
    config: &M::Config,
    output: &Path,
) -> Result<TrainingReport> {
    let report = model.train(train, vocabulary, dev, config)?;
    model
        .save_weights(output)
        .with_context(|| format!("failed to save weights to {}", output.display()))?;
    Ok(report)
}

/// Train a model and save its weights and vocabulary.
fn train_model(args: &TrainArgs, cli_args: &SentiraArgs) -> Result<()> {
    let start = Instant::now();
    let config = load_config(args.config.as_deref())?;
    let preprocessor = load_preprocessor(&args.stopwords)?;
    let loader = CorpusLoader::new(preprocessor.clone())
        .include_neutral(args.include_neutral)
        .with_limit(args.limit);

    let train = load_corpus(&loader, &args.train)?;
    let dev = args
        .dev
        .as_deref()
        .map(|path| load_corpus(&loader, path))
        .transpose()?;
    let vocabulary = train.create_vocabulary();

    let report = match args.model {
        ModelKind::NaiveBayes => fit_and_save(
            NaiveBayesClassifier::new(preprocessor),
            &train,
            &vocabulary,
            dev.as_ref(),
            &config.naive_bayes,
            &args.output,
        )?,
        ModelKind::Logistic => fit_and_save(
            LogisticRegression::new(vocabulary.len()),
            &train,
            &vocabulary,
            dev.as_ref(),
            &config.logistic,
            &args.output,
        )?,
        ModelKind::Svm => fit_and_save(
            SvmClassifier::new(),
            &train,
            &vocabulary,
            dev.as_ref(),
            &config.svm,
            &args.output,
        )?,
        ModelKind::Network => fit_and_save(
            TwoLayerNetwork::from_config(vocabulary.len(), &config.network)?,
            &train,
            &vocabulary,
            dev.as_ref(),
            &config.network,
            &args.output,
        )?,
    };

    let vocab_path = vocabulary_path(&args.output);
    vocabulary
        .save(&vocab_path)
        .with_context(|| format!("failed to save vocabulary to {}", vocab_path.display()))?;

    output_result(
        "Training complete",
        &TrainingSummary {
            model: args.model,
            train_samples: train.len(),
            dev_samples: dev.as_ref().map(Dataset::len),
            vocabulary_size: vocabulary.len(),
            weights_path: args.output.display().to_string(),
            vocabulary_path: vocab_path.display().to_string(),
            duration_ms: start.elapsed().as_millis() as u64,
            report,
        },
        cli_args,
    )?;

    Ok(())
}

fn restore<M: Predictable + Persistable + 'static>(
    mut model: M,
    weights: &Path,
) -> Result<Box<dyn Predictable>> {
    model
        .load_weights(weights)
        .with_context(|| format!("failed to load weights from {}", weights.display()))?;
    Ok(Box::new(model))
}

/// Rebuild a saved model together with the vocabulary it was trained on.
fn load_model(
    kind: ModelKind,
    weights: &Path,
    preprocessor: &TextPreprocessor,
    config: &SentiraConfig,
) -> Result<(Box<dyn Predictable>, Vocabulary)> {
    let vocab_path = vocabulary_path(weights);
    let load_vocabulary = || {
        Vocabulary::load(&vocab_path)
            .with_context(|| format!("failed to load vocabulary from {}", vocab_path.display()))
    };

    Ok(match kind {
        ModelKind::NaiveBayes => (
            restore(NaiveBayesClassifier::new(preprocessor.clone()), weights)?,
            Vocabulary::new(),
        ),
        ModelKind::Logistic => {
            let vocabulary = load_vocabulary()?;
            let model = restore(LogisticRegression::new(vocabulary.len()), weights)?;
            (model, vocabulary)
        }
        ModelKind::Svm => {
            let vocabulary = load_vocabulary()?;
            let model = restore(SvmClassifier::with_dimension(vocabulary.len()), weights)?;
            (model, vocabulary)
        }
        ModelKind::Network => {
            let vocabulary = load_vocabulary()?;
            let network = TwoLayerNetwork::with_seed(
                vocabulary.len(),
                config.network.hidden_size,
                config.network.seed.unwrap_or_default(),
            );
            (restore(network, weights)?, vocabulary)
        }
    })
}

/// Evaluate saved weights on a labeled corpus.
fn evaluate_model(args: &EvaluateArgs, cli_args: &SentiraArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let preprocessor = load_preprocessor(&args.stopwords)?;
    let (model, vocabulary) = load_model(args.model, &args.weights, &preprocessor, &config)?;

    let loader = CorpusLoader::new(preprocessor)
        .include_neutral(args.include_neutral)
        .with_limit(args.limit);
    let dataset = load_corpus(&loader, &args.data)?;
    let accuracy = model.evaluate(&dataset, &vocabulary)?;

    output_result(
        "Evaluation complete",
        &EvaluationResult {
            model: args.model,
            samples: dataset.len(),
            accuracy,
        },
        cli_args,
    )?;

    Ok(())
}

/// Predict the sentiment of a single text.
fn predict_text(args: &PredictArgs, cli_args: &SentiraArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let preprocessor = load_preprocessor(&args.stopwords)?;
    let (model, vocabulary) = load_model(args.model, &args.weights, &preprocessor, &config)?;

    let tokens = preprocessor.preprocess(&args.text)?;
    let sentiment = model.predict_tokens(&tokens, &vocabulary)?;

    output_result(
        "Prediction complete",
        &PredictionResult {
            model: args.model,
            text: args.text.clone(),
            sentiment,
        },
        cli_args,
    )?;

    Ok(())
}
