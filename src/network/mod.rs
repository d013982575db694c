pub mod network;
pub mod config;

pub use network::{Network, WeightLayer};
pub use config::{ModelConfig, ConfigError};
