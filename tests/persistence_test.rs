use sentira::analysis::analyzer::preprocessor::TextPreprocessor;
use sentira::config::{LogisticRegressionConfig, NaiveBayesConfig, NetworkConfig, SvmConfig};
use sentira::dataset::{Dataset, Sentiment};
use sentira::error::{Result, SentiraError};
use sentira::model::logistic::LogisticRegression;
use sentira::model::naive_bayes::NaiveBayesClassifier;
use sentira::model::network::TwoLayerNetwork;
use sentira::model::svm::SvmClassifier;
use sentira::model::{Persistable, Predictable, Trainable};
use sentira::vocabulary::Vocabulary;

fn corpus() -> Result<Dataset> {
    let preprocessor = TextPreprocessor::from_stopwords(vec!["the", "is", "a", "this", "i"]);
    let posts = [
        ("This game is amazing, loved every minute", Sentiment::Positive),
        ("Servers down AGAIN. Worst launch ever", Sentiment::Negative),
        ("great update, the new maps are fun", Sentiment::Positive),
        ("refund please, it crashes on startup", Sentiment::Negative),
        ("I love the soundtrack!!!", Sentiment::Positive),
        ("so much lag, unplayable", Sentiment::Negative),
    ];

    let mut dataset = Dataset::new();
    for (text, label) in posts {
        dataset.add_sample(preprocessor.preprocess(text)?, label);
    }
    Ok(dataset)
}

fn probes() -> Vec<Vec<String>> {
    [
        vec!["amaz", "game"],
        vec!["worst", "lag"],
        vec!["unknown", "token"],
        vec![],
        vec!["fun", "crashe", "love"],
    ]
    .into_iter()
    .map(|tokens| tokens.into_iter().map(String::from).collect())
    .collect()
}

fn predictions<M: Predictable>(model: &M, vocabulary: &Vocabulary) -> Result<Vec<Sentiment>> {
    probes()
        .iter()
        .map(|tokens| model.predict_tokens(tokens, vocabulary))
        .collect()
}

#[test]
fn test_naive_bayes_round_trip() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("nb.bin");
    let dataset = corpus()?;
    let vocabulary = dataset.create_vocabulary();

    let mut model = NaiveBayesClassifier::default();
    model.train(&dataset, &vocabulary, None, &NaiveBayesConfig { laplace: 0.5 })?;
    model.save_weights(&path)?;

    let mut restored = NaiveBayesClassifier::default();
    restored.load_weights(&path)?;

    assert_eq!(predictions(&restored, &vocabulary)?, predictions(&model, &vocabulary)?);
    assert_eq!(
        restored.evaluate(&dataset, &vocabulary)?,
        model.evaluate(&dataset, &vocabulary)?
    );

    // saving the restored model reproduces the snapshot byte for byte
    let copy = dir.path().join("nb-copy.bin");
    restored.save_weights(&copy)?;
    assert_eq!(std::fs::read(&path)?, std::fs::read(&copy)?);
    Ok(())
}

#[test]
fn test_logistic_round_trip() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("lr.bin");
    let dataset = corpus()?;
    let vocabulary = dataset.create_vocabulary();

    let mut model = LogisticRegression::new(vocabulary.len());
    model.train(&dataset, &vocabulary, None, &LogisticRegressionConfig::default())?;
    model.save_weights(&path)?;

    let mut restored = LogisticRegression::new(vocabulary.len());
    restored.load_weights(&path)?;

    assert_eq!(restored.weights(), model.weights());
    assert_eq!(restored.bias(), model.bias());
    assert_eq!(predictions(&restored, &vocabulary)?, predictions(&model, &vocabulary)?);
    Ok(())
}

#[test]
fn test_svm_round_trip() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("svm.bin");
    let dataset = corpus()?;
    let vocabulary = dataset.create_vocabulary();

    let mut model = SvmClassifier::new();
    model.train(&dataset, &vocabulary, None, &SvmConfig::default())?;
    model.save_weights(&path)?;
    assert_eq!(
        std::fs::metadata(&path)?.len(),
        8 * (vocabulary.len() as u64 + 1)
    );

    let mut restored = SvmClassifier::with_dimension(vocabulary.len());
    restored.load_weights(&path)?;

    assert_eq!(restored, model);
    assert_eq!(predictions(&restored, &vocabulary)?, predictions(&model, &vocabulary)?);
    Ok(())
}

#[test]
fn test_network_round_trip() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("nn.bin");
    let dataset = corpus()?;
    let vocabulary = dataset.create_vocabulary();
    let config = NetworkConfig {
        hidden_size: 6,
        epochs: 5,
        seed: Some(2024),
        ..Default::default()
    };

    let mut model = TwoLayerNetwork::from_config(vocabulary.len(), &config)?;
    model.train(&dataset, &vocabulary, None, &config)?;
    model.save_weights(&path)?;

    let mut restored = TwoLayerNetwork::with_seed(vocabulary.len(), 6, 1);
    restored.load_weights(&path)?;

    assert_eq!(restored, model);
    assert_eq!(predictions(&restored, &vocabulary)?, predictions(&model, &vocabulary)?);
    Ok(())
}

#[test]
fn test_dimension_mismatch_leaves_parameters_untouched() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let dataset = corpus()?;
    let vocabulary = dataset.create_vocabulary();

    let lr_path = dir.path().join("lr.bin");
    let mut trained = LogisticRegression::new(vocabulary.len());
    trained.train(&dataset, &vocabulary, None, &LogisticRegressionConfig::default())?;
    trained.save_weights(&lr_path)?;

    let mut smaller = LogisticRegression::new(3);
    let before = smaller.clone();
    let err = smaller.load_weights(&lr_path).unwrap_err();
    assert!(matches!(err, SentiraError::DimensionMismatch { .. }));
    assert_eq!(smaller, before);

    let svm_path = dir.path().join("svm.bin");
    SvmClassifier::with_dimension(vocabulary.len()).save_weights(&svm_path)?;
    let mut svm = SvmClassifier::with_dimension(vocabulary.len() + 2);
    match svm.load_weights(&svm_path).unwrap_err() {
        SentiraError::DimensionMismatch { expected, found } => {
            assert_eq!(expected, format!("{} weights", vocabulary.len() + 2));
            assert_eq!(found, format!("{} weights", vocabulary.len()));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(svm, SvmClassifier::with_dimension(vocabulary.len() + 2));

    let nn_path = dir.path().join("nn.bin");
    TwoLayerNetwork::with_seed(vocabulary.len(), 4, 5).save_weights(&nn_path)?;
    let mut network = TwoLayerNetwork::with_seed(vocabulary.len(), 8, 5);
    let before = network.clone();
    assert!(matches!(
        network.load_weights(&nn_path),
        Err(SentiraError::DimensionMismatch { .. })
    ));
    assert_eq!(network, before);
    Ok(())
}

#[test]
fn test_missing_file_is_an_io_error() {
    let mut model = SvmClassifier::with_dimension(2);
    assert!(matches!(
        model.load_weights(std::path::Path::new("/no/such/weights.bin")),
        Err(SentiraError::Io(_))
    ));
}
