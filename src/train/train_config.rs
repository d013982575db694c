/// Configuration for a `train_loop` run.
///
/// Training is always online: one weight update per sample, samples visited
/// in the order given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainConfig {
    /// Full passes over the training data.
    pub epochs: usize,
}

impl TrainConfig {
    pub fn new(epochs: usize) -> Self {
        TrainConfig { epochs }
    }
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig { epochs: 5 }
    }
}
