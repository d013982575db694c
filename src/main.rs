use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use nobias_nn::data::image_to_input;
use nobias_nn::train::{evaluate_file, train_file};
use nobias_nn::{load, save, ModelConfig, Network, TrainConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Train on the training CSV and save the weights
    Train,
    /// Load the weights and score the test CSV
    Predict,
}

/// Three-layer bias-free digit classifier.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Run a full training or evaluation pass over the MNIST CSV files
    #[arg(long, value_enum)]
    mnist: Option<Mode>,
    /// Image of a single digit to classify with the stored weights
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,
    /// JSON model config; flags below override its values
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Directory holding the weight artifacts
    #[arg(long, value_name = "DIR")]
    weights_dir: Option<PathBuf>,
    #[arg(long, value_name = "PATH", default_value = "mnist_dataset/mnist_train.csv")]
    train_csv: PathBuf,
    #[arg(long, value_name = "PATH", default_value = "mnist_dataset/mnist_test.csv")]
    test_csv: PathBuf,
    #[arg(long, value_name = "INT")]
    epochs: Option<usize>,
    /// Seed for the initial weights; entropy-seeded when omitted
    #[arg(long, value_name = "INT")]
    seed: Option<u64>,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().compact().with_env_filter(filter).init();
}

fn resolve_config(cli: &Cli) -> Result<ModelConfig> {
    let mut config = match &cli.config {
        Some(path) => ModelConfig::load_json(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ModelConfig::default(),
    };
    if let Some(dir) = &cli.weights_dir {
        config.weights_dir = dir.clone();
    }
    if let Some(epochs) = cli.epochs {
        config.epochs = epochs;
    }
    config.validate()?;
    Ok(config)
}

fn build_network(config: &ModelConfig, seed: Option<u64>) -> Result<Network> {
    let network = match seed {
        Some(seed) => config.build_seeded(seed)?,
        None => config.build()?,
    };
    Ok(network)
}

fn load_weights(network: &mut Network, config: &ModelConfig) {
    let report = load(network, &config.weights_dir);
    if !report.is_complete() {
        warn!(dir = %config.weights_dir.display(), "continuing with some freshly initialized weights");
    }
}

fn run_train(network: &mut Network, config: &ModelConfig, cli: &Cli) -> Result<()> {
    info!(path = %cli.train_csv.display(), epochs = config.epochs, "training");

    let t1 = Instant::now();
    train_file(network, &cli.train_csv, &TrainConfig::new(config.epochs), |stats| {
        println!("On epoch {} of {}: mse {:.6}", stats.epoch, stats.total_epochs, stats.mean_squared_error);
    })
    .with_context(|| format!("reading training set {}", cli.train_csv.display()))?;
    println!("\nTime taken to train: {:?}", t1.elapsed());

    let report = save(network, &config.weights_dir);
    for e in report.errors() {
        eprintln!("unable to save weights: {}", e);
    }
    Ok(())
}

fn run_predict(network: &mut Network, config: &ModelConfig, cli: &Cli) -> Result<()> {
    load_weights(network, config);
    let t1 = Instant::now();
    let evaluation = evaluate_file(network, &cli.test_csv)
        .with_context(|| format!("reading test set {}", cli.test_csv.display()))?;
    println!("Time taken to check: {:?}", t1.elapsed());
    println!("correct: {}", evaluation.correct);
    println!("total: {}", evaluation.total);
    println!("accuracy: {}", evaluation.accuracy());
    Ok(())
}

fn run_image(network: &mut Network, config: &ModelConfig, path: &Path) -> Result<()> {
    let input = image_to_input(path)?;
    if input.len() != network.input_count() {
        bail!(
            "{} has {} pixels, the network expects {}",
            path.display(),
            input.len(),
            network.input_count()
        );
    }
    load_weights(network, config);

    let output = network.predict(&input);
    for (digit, value) in output.as_slice().iter().enumerate() {
        println!("{}: {:.6}", digit, value);
    }
    println!("prediction: {}", network.classify(&input));
    Ok(())
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    let mut network = build_network(&config, cli.seed)?;

    match cli.mnist {
        Some(Mode::Train) => run_train(&mut network, &config, &cli)?,
        Some(Mode::Predict) => run_predict(&mut network, &config, &cli)?,
        None => {}
    }

    if let Some(path) = &cli.file {
        run_image(&mut network, &config, path)?;
    }
    Ok(())
}
