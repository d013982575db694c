use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::network::network::{Network, WeightLayer};
use crate::persist::codec::{read_matrix, write_matrix, PersistError};

pub const HIDDEN_ARTIFACT: &str = "hweights.nbmod";
pub const OUTPUT_ARTIFACT: &str = "oweights.nbmod";

pub fn artifact_path(dir: &Path, layer: WeightLayer) -> PathBuf {
    match layer {
        WeightLayer::Hidden => dir.join(HIDDEN_ARTIFACT),
        WeightLayer::Output => dir.join(OUTPUT_ARTIFACT),
    }
}

/// Per-artifact result of `save`.
#[derive(Debug)]
pub struct SaveReport {
    pub hidden: Result<PathBuf, PersistError>,
    pub output: Result<PathBuf, PersistError>,
}

impl SaveReport {
    /// True when both artifacts were written.
    pub fn is_complete(&self) -> bool {
        self.hidden.is_ok() && self.output.is_ok()
    }

    pub fn errors(&self) -> impl Iterator<Item = &PersistError> {
        [&self.hidden, &self.output].into_iter().filter_map(|r| r.as_ref().err())
    }
}

#[derive(Debug)]
pub enum LoadOutcome {
    Loaded,
    /// No artifact on disk; the matrix keeps its previous value.
    Missing,
    /// Artifact present but unusable; the matrix keeps its previous value.
    Failed(PersistError),
}

/// Per-artifact result of `load`.
#[derive(Debug)]
pub struct LoadReport {
    pub hidden: LoadOutcome,
    pub output: LoadOutcome,
}

impl LoadReport {
    /// True when both matrices were replaced from disk.
    pub fn is_complete(&self) -> bool {
        matches!((&self.hidden, &self.output), (LoadOutcome::Loaded, LoadOutcome::Loaded))
    }

    /// True when at least one matrix was replaced.
    pub fn any_loaded(&self) -> bool {
        matches!(self.hidden, LoadOutcome::Loaded) || matches!(self.output, LoadOutcome::Loaded)
    }
}

/// Writes both weight matrices into `dir`, creating it if needed.
///
/// Each artifact is written independently: a failure on one is logged and
/// reported but does not stop the other. Nothing is atomic, so a failed save
/// can leave a new hidden artifact next to an old output artifact.
pub fn save(network: &Network, dir: &Path) -> SaveReport {
    if let Err(e) = std::fs::create_dir_all(dir) {
        warn!(dir = %dir.display(), error = %e, "unable to create weights directory");
    }

    let hidden = save_layer(network, dir, WeightLayer::Hidden);
    let output = save_layer(network, dir, WeightLayer::Output);
    SaveReport { hidden, output }
}

fn save_layer(network: &Network, dir: &Path, layer: WeightLayer) -> Result<PathBuf, PersistError> {
    let path = artifact_path(dir, layer);
    match write_artifact(&path, network, layer) {
        Ok(()) => {
            debug!(path = %path.display(), ?layer, "wrote weights");
            Ok(path)
        }
        Err(e) => {
            warn!(path = %path.display(), ?layer, error = %e, "unable to write weights");
            Err(e)
        }
    }
}

fn write_artifact(path: &Path, network: &Network, layer: WeightLayer) -> Result<(), PersistError> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_matrix(&mut writer, network.weights(layer))
}

/// Replaces the network's weights with those stored in `dir`.
///
/// Best effort and per matrix: a missing, unreadable, malformed or
/// wrongly-shaped artifact leaves that matrix as it was. If only one
/// artifact loads, the network ends up mixing stored and previous weights;
/// check `LoadReport::is_complete` when that matters.
pub fn load(network: &mut Network, dir: &Path) -> LoadReport {
    let hidden = load_layer(network, dir, WeightLayer::Hidden);
    let output = load_layer(network, dir, WeightLayer::Output);
    LoadReport { hidden, output }
}

fn load_layer(network: &mut Network, dir: &Path, layer: WeightLayer) -> LoadOutcome {
    let path = artifact_path(dir, layer);
    let file = match File::open(&path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), ?layer, "no stored weights, keeping current");
            return LoadOutcome::Missing;
        }
        Err(e) => {
            warn!(path = %path.display(), ?layer, error = %e, "unable to open weights, keeping current");
            return LoadOutcome::Failed(PersistError::Io(e));
        }
    };

    let matrix = match read_matrix(&mut BufReader::new(file)) {
        Ok(matrix) => matrix,
        Err(e) => {
            warn!(path = %path.display(), ?layer, error = %e, "unable to decode weights, keeping current");
            return LoadOutcome::Failed(e);
        }
    };

    let expected = network.expected_shape(layer);
    if matrix.shape() != expected {
        let e = PersistError::ShapeMismatch { expected, found: matrix.shape() };
        warn!(path = %path.display(), ?layer, error = %e, "stored weights do not fit, keeping current");
        return LoadOutcome::Failed(e);
    }

    network.replace_weights(layer, matrix);
    debug!(path = %path.display(), ?layer, "loaded weights");
    LoadOutcome::Loaded
}
