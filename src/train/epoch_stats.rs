/// Statistics for one completed epoch, handed to the `train_loop` callback.
#[derive(Debug, Clone)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    pub total_epochs: usize,
    /// Mean over the epoch of each sample's squared error, measured on the
    /// forward pass just before that sample's update.
    pub mean_squared_error: f64,
    pub elapsed_ms: u64,
}

/// Outcome of classifying a labelled set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub correct: usize,
    pub total: usize,
}

impl Evaluation {
    /// Fraction in `[0, 1]`; zero for an empty set.
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.correct as f64 / self.total as f64
    }
}
