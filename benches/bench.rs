//! Criterion benchmarks for Sentira.
//!
//! Covers the hot paths of a training run:
//! - Text preprocessing
//! - Vocabulary construction and vectorization
//! - One epoch of each classifier

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use sentira::analysis::analyzer::preprocessor::TextPreprocessor;
use sentira::config::{LogisticRegressionConfig, NaiveBayesConfig, NetworkConfig, SvmConfig};
use sentira::dataset::{Dataset, Sentiment};
use sentira::model::Trainable;
use sentira::model::logistic::LogisticRegression;
use sentira::model::naive_bayes::NaiveBayesClassifier;
use sentira::model::network::TwoLayerNetwork;
use sentira::model::svm::SvmClassifier;
use std::hint::black_box;

const STOPWORDS: [&str; 8] = ["the", "a", "is", "i", "this", "and", "to", "it"];

/// Generate tweet-like posts for benchmarking.
fn generate_test_posts(count: usize) -> Vec<(String, Sentiment)> {
    let positive = [
        "love", "amazing", "great", "fun", "awesome", "beautiful", "enjoyed", "best",
    ];
    let negative = [
        "hate", "crashing", "worst", "lag", "broken", "boring", "refund", "bugs",
    ];
    let filler = [
        "the", "game", "update", "servers", "tonight", "this", "is", "graphics", "players",
        "stream", "and", "patch",
    ];

    let mut posts = Vec::with_capacity(count);
    for i in 0..count {
        let (label, sentiment_words) = if i % 2 == 0 {
            (Sentiment::Positive, &positive)
        } else {
            (Sentiment::Negative, &negative)
        };

        let length = 8 + (i % 12);
        let mut words = Vec::with_capacity(length);
        for j in 0..length {
            // Pseudo-random distribution
            if j % 3 == 0 {
                words.push(sentiment_words[(i * 5 + j) % sentiment_words.len()].to_string());
            } else {
                words.push(filler[(i * 7 + j * 13) % filler.len()].to_string());
            }
        }
        if i % 4 == 0 {
            words.push(format!("{}/10!!", i % 11));
        }

        posts.push((words.join(" "), label));
    }

    posts
}

fn generate_dataset(preprocessor: &TextPreprocessor, count: usize) -> Dataset {
    let mut dataset = Dataset::new();
    for (text, label) in generate_test_posts(count) {
        dataset.add_sample(preprocessor.preprocess(&text).unwrap(), label);
    }
    dataset
}

/// Benchmark text preprocessing.
fn bench_preprocessing(c: &mut Criterion) {
    let mut group = c.benchmark_group("preprocessing");

    let preprocessor = TextPreprocessor::from_stopwords(STOPWORDS);
    let posts = generate_test_posts(1000);

    group.bench_function("preprocess_single_post", |b| {
        b.iter(|| {
            let result = preprocessor.preprocess(black_box(&posts[0].0));
            black_box(result)
        })
    });

    group.throughput(Throughput::Elements(100));
    group.bench_function("preprocess_batch_posts", |b| {
        b.iter(|| {
            for (text, _) in posts.iter().take(100) {
                let result = preprocessor.preprocess(black_box(text));
                let _ = black_box(result);
            }
        })
    });

    group.finish();
}

/// Benchmark vocabulary construction and feature extraction.
fn bench_vocabulary(c: &mut Criterion) {
    let mut group = c.benchmark_group("vocabulary");

    let preprocessor = TextPreprocessor::from_stopwords(STOPWORDS);
    let dataset = generate_dataset(&preprocessor, 1000);
    let vocabulary = dataset.create_vocabulary();

    group.bench_function("create_vocabulary_1k", |b| {
        b.iter(|| black_box(dataset.create_vocabulary()))
    });

    group.throughput(Throughput::Elements(dataset.len() as u64));
    group.bench_function("vectorize_dataset_1k", |b| {
        b.iter(|| {
            for sample in dataset.iter() {
                black_box(vocabulary.vectorize(black_box(sample.tokens())));
            }
        })
    });

    group.finish();
}

/// Benchmark a single training epoch of every classifier.
fn bench_training(c: &mut Criterion) {
    let mut group = c.benchmark_group("training");
    group.sample_size(20);

    let preprocessor = TextPreprocessor::from_stopwords(STOPWORDS);
    let dataset = generate_dataset(&preprocessor, 500);
    let vocabulary = dataset.create_vocabulary();
    group.throughput(Throughput::Elements(dataset.len() as u64));

    group.bench_function("naive_bayes", |b| {
        let config = NaiveBayesConfig::default();
        b.iter_with_setup(NaiveBayesClassifier::default, |mut model| {
            let report = model.train(&dataset, &vocabulary, None, &config);
            black_box(report)
        })
    });

    group.bench_function("logistic_regression_epoch", |b| {
        let config = LogisticRegressionConfig {
            epochs: 1,
            ..Default::default()
        };
        b.iter_with_setup(
            || LogisticRegression::new(vocabulary.len()),
            |mut model| {
                let report = model.train(&dataset, &vocabulary, None, &config);
                black_box(report)
            },
        )
    });

    group.bench_function("svm_epoch", |b| {
        let config = SvmConfig {
            epochs: 1,
            ..Default::default()
        };
        b.iter_with_setup(SvmClassifier::new, |mut model| {
            let report = model.train(&dataset, &vocabulary, None, &config);
            black_box(report)
        })
    });

    group.finish();
}

/// Network epochs across hidden layer sizes.
fn bench_network_scalability(c: &mut Criterion) {
    let mut group = c.benchmark_group("network_scalability");
    group.sample_size(10);

    let preprocessor = TextPreprocessor::from_stopwords(STOPWORDS);
    let dataset = generate_dataset(&preprocessor, 200);
    let vocabulary = dataset.create_vocabulary();

    for hidden_size in [8, 32] {
        let config = NetworkConfig {
            hidden_size,
            epochs: 1,
            seed: Some(7),
            ..Default::default()
        };

        group.bench_with_input(
            BenchmarkId::new("epoch", hidden_size),
            &config,
            |b, config| {
                b.iter_with_setup(
                    || TwoLayerNetwork::with_seed(vocabulary.len(), config.hidden_size, 7),
                    |mut network| {
                        let report = network.train(&dataset, &vocabulary, None, config);
                        black_box(report)
                    },
                )
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_preprocessing,
    bench_vocabulary,
    bench_training
);

// Separate group for slower benchmarks
criterion_group!(slow_benches, bench_network_scalability);

criterion_main!(benches, slow_benches);
