pub mod math;
pub mod activation;
pub mod network;
pub mod persist;
pub mod train;
pub mod data;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use network::network::{Network, WeightLayer};
pub use network::config::ModelConfig;
pub use persist::store::{load, save, LoadReport, SaveReport};
pub use train::{evaluate, train_loop, TrainConfig};
pub use data::sample::Sample;
