use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Serialize, Deserialize};

use crate::network::network::Network;

/// Architecture and training hyperparameters for a run.
///
/// Stored as JSON so training and inference processes agree on layer sizes
/// before any weights are read. Missing fields fall back to the defaults,
/// which describe a 28x28 digit classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub input_count: usize,
    pub hidden_count: usize,
    pub output_count: usize,
    pub learning_rate: f64,
    /// Full passes over the training set.
    pub epochs: usize,
    /// Directory holding the two weight artifacts.
    pub weights_dir: PathBuf,
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig {
            input_count: 784,
            hidden_count: 200,
            output_count: 10,
            learning_rate: 0.1,
            epochs: 5,
            weights_dir: PathBuf::from("modelweights"),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot access config file: {}", e),
            ConfigError::Json(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Json(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl ModelConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let layers = [
            ("input_count", self.input_count),
            ("hidden_count", self.hidden_count),
            ("output_count", self.output_count),
        ];
        for (name, size) in layers {
            if size == 0 {
                return Err(ConfigError::Invalid(format!("{} must be positive", name)));
            }
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "learning_rate must be a positive number, got {}",
                self.learning_rate
            )));
        }
        Ok(())
    }

    /// Fresh randomly initialized network with this architecture.
    pub fn build(&self) -> Result<Network, ConfigError> {
        self.validate()?;
        Ok(Network::new(self.input_count, self.hidden_count, self.output_count, self.learning_rate))
    }

    /// Like `build`, but reproducible.
    pub fn build_seeded(&self, seed: u64) -> Result<Network, ConfigError> {
        self.validate()?;
        Ok(Network::with_seed(self.input_count, self.hidden_count, self.output_count, self.learning_rate, seed))
    }

    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json(&self, path: &Path) -> Result<(), ConfigError> {
        let file = std::fs::File::create(path).map_err(ConfigError::Io)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self).map_err(ConfigError::Json)
    }

    /// Reads and validates a config written by `save_json` (or by hand).
    pub fn load_json(path: &Path) -> Result<ModelConfig, ConfigError> {
        let file = std::fs::File::open(path).map_err(ConfigError::Io)?;
        let reader = std::io::BufReader::new(file);
        let config: ModelConfig = serde_json::from_reader(reader).map_err(ConfigError::Json)?;
        config.validate()?;
        Ok(config)
    }
}
