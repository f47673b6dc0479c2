//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{ModelKind, OutputFormat, SentiraArgs};
use crate::dataset::Sentiment;
use crate::error::Result;
use crate::model::TrainingReport;

/// Result structure for training.
#[derive(Debug, Serialize, Deserialize)]
pub struct TrainingSummary {
    pub model: ModelKind,
    pub train_samples: usize,
    pub dev_samples: Option<usize>,
    pub vocabulary_size: usize,
    pub weights_path: String,
    pub vocabulary_path: String,
    pub duration_ms: u64,
    pub report: TrainingReport,
}

/// Result structure for evaluation.
#[derive(Debug, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub model: ModelKind,
    pub samples: usize,
    pub accuracy: f64,
}

/// Result structure for prediction.
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictionResult {
    pub model: ModelKind,
    pub text: String,
    pub sentiment: Sentiment,
}

/// Values that know how to print themselves for humans.
pub trait HumanOutput {
    fn print_human(&self, args: &SentiraArgs);
}

impl HumanOutput for TrainingSummary {
    fn print_human(&self, args: &SentiraArgs) {
        println!("Model:           {:?}", self.model);
        println!("Train samples:   {}", self.train_samples);
        if let Some(dev) = self.dev_samples {
            println!("Dev samples:     {dev}");
        }
        println!("Vocabulary size: {}", self.vocabulary_size);

        if args.verbosity() > 0 && !self.report.epochs.is_empty() {
            println!();
            println!("Epoch      Loss  Dev accuracy");
            println!("─────────────────────────────");
            for epoch in &self.report.epochs {
                let accuracy = epoch
                    .dev_accuracy
                    .map(|a| format!("{a:.2}%"))
                    .unwrap_or_else(|| "-".to_string());
                println!("{:>5} {:>9.4} {:>13}", epoch.epoch, epoch.loss, accuracy);
            }
            println!();
        }

        if let Some(accuracy) = self.report.dev_accuracy {
            println!("Dev accuracy:    {accuracy:.2}%");
        }
        println!("Weights:         {}", self.weights_path);
        println!("Vocabulary:      {}", self.vocabulary_path);
        println!("Time:            {}ms", self.duration_ms);
    }
}

impl HumanOutput for EvaluationResult {
    fn print_human(&self, _args: &SentiraArgs) {
        println!("Samples:  {}", self.samples);
        println!("Accuracy: {:.2}%", self.accuracy);
    }
}

impl HumanOutput for PredictionResult {
    fn print_human(&self, _args: &SentiraArgs) {
        println!("{}", self.sentiment);
    }
}

/// Output a result in the requested format.
pub fn output_result<T: Serialize + HumanOutput>(
    message: &str,
    result: &T,
    args: &SentiraArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 1 {
                println!("{message}");
                println!();
            }
            result.print_human(args);
            Ok(())
        }
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &SentiraArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prediction_json() {
        let result = PredictionResult {
            model: ModelKind::NaiveBayes,
            text: "gg".to_string(),
            sentiment: Sentiment::Positive,
        };

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["model"], "naive-bayes");
        assert_eq!(value["sentiment"], "Positive");
    }

    #[test]
    fn test_training_summary_json() {
        let mut report = TrainingReport::new("svm");
        report.push_epoch(1, 1, 2.5, Some(50.0));

        let summary = TrainingSummary {
            model: ModelKind::Svm,
            train_samples: 4,
            dev_samples: Some(2),
            vocabulary_size: 7,
            weights_path: "svm.bin".to_string(),
            vocabulary_path: "svm.bin.vocab".to_string(),
            duration_ms: 3,
            report,
        };

        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["report"]["epochs"][0]["loss"], 2.5);
        assert_eq!(value["report"]["dev_accuracy"], 50.0);
    }
}
