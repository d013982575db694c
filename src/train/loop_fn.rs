use std::borrow::Borrow;
use std::convert::Infallible;
use std::path::Path;
use std::time::Instant;

use tracing::info;

use crate::data::csv::SampleReader;
use crate::data::sample::{DataError, Sample};
use crate::network::network::Network;
use crate::train::epoch_stats::{EpochStats, Evaluation};
use crate::train::train_config::TrainConfig;

/// Trains `network` online for `config.epochs` passes over `samples`.
///
/// `on_epoch` is called once per completed epoch. Returns the stats of the
/// last epoch, or `None` if no epoch ran.
///
/// # Panics
/// Panics if a sample's input or target length does not fit the network.
pub fn train_loop<F>(
    network: &mut Network,
    samples: &[Sample],
    config: &TrainConfig,
    mut on_epoch: F,
) -> Option<EpochStats>
where
    F: FnMut(&EpochStats),
{
    let result = run_epochs(network, config, &mut on_epoch, || {
        Ok::<_, Infallible>(samples.iter().map(Ok))
    });
    match result {
        Ok(last) => last,
        Err(never) => match never {},
    }
}

/// Like `train_loop`, but re-reads the CSV file at `path` on every epoch
/// instead of holding the whole set in memory.
///
/// Stops at the first unreadable or malformed row; updates made before it
/// are kept.
pub fn train_file<F>(
    network: &mut Network,
    path: &Path,
    config: &TrainConfig,
    mut on_epoch: F,
) -> Result<Option<EpochStats>, DataError>
where
    F: FnMut(&EpochStats),
{
    let (inputs, outputs) = (network.input_count(), network.output_count());
    run_epochs(network, config, &mut on_epoch, || SampleReader::open(path, inputs, outputs))
}

fn run_epochs<I, S, E, O, F>(
    network: &mut Network,
    config: &TrainConfig,
    on_epoch: &mut F,
    mut open: O,
) -> Result<Option<EpochStats>, E>
where
    O: FnMut() -> Result<I, E>,
    I: Iterator<Item = Result<S, E>>,
    S: Borrow<Sample>,
    F: FnMut(&EpochStats),
{
    let started = Instant::now();
    let mut last = None;
    let mut count = 0;

    for epoch in 1..=config.epochs {
        let t_start = Instant::now();
        let mut total_error = 0.0;
        count = 0;

        for sample in open()? {
            let sample = sample?;
            let sample = sample.borrow();
            total_error += network.train_with_error(&sample.input, &sample.target);
            count += 1;
        }

        let mean_squared_error = if count == 0 {
            0.0
        } else {
            total_error / count as f64
        };

        let stats = EpochStats {
            epoch,
            total_epochs: config.epochs,
            mean_squared_error,
            elapsed_ms: t_start.elapsed().as_millis() as u64,
        };
        info!(epoch, total = config.epochs, mse = stats.mean_squared_error, elapsed_ms = stats.elapsed_ms, "epoch finished");
        on_epoch(&stats);
        last = Some(stats);
    }

    info!(samples = count, elapsed = ?started.elapsed(), "training finished");
    Ok(last)
}

/// Counts samples whose strongest output matches the label.
pub fn evaluate(network: &Network, samples: &[Sample]) -> Evaluation {
    match tally(network, samples.iter().map(Ok::<_, Infallible>)) {
        Ok(evaluation) => evaluation,
        Err(never) => match never {},
    }
}

/// Like `evaluate`, streaming the samples from a CSV file.
pub fn evaluate_file(network: &Network, path: &Path) -> Result<Evaluation, DataError> {
    tally(network, SampleReader::open(path, network.input_count(), network.output_count())?)
}

fn tally<I, S, E>(network: &Network, samples: I) -> Result<Evaluation, E>
where
    I: Iterator<Item = Result<S, E>>,
    S: Borrow<Sample>,
{
    let started = Instant::now();
    let mut evaluation = Evaluation { correct: 0, total: 0 };
    for sample in samples {
        let sample = sample?;
        let sample = sample.borrow();
        if network.classify(&sample.input) == sample.label {
            evaluation.correct += 1;
        }
        evaluation.total += 1;
    }
    info!(correct = evaluation.correct, total = evaluation.total, elapsed = ?started.elapsed(), "evaluation finished");
    Ok(evaluation)
}
