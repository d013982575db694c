use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::activation::activation::{sigmoid, sigmoid_composite};
use crate::math::init::random_matrix;
use crate::math::matrix::Matrix;

/// Identifies one of the two weight matrices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightLayer {
    /// input -> hidden, shape `(hidden, input)`
    Hidden,
    /// hidden -> output, shape `(output, hidden)`
    Output,
}

/// Three-layer fully connected network without bias terms.
///
/// Layer sizes and learning rate are fixed at construction. The only state
/// that changes afterwards is the pair of weight matrices, replaced wholesale
/// by `train` or by loading persisted weights.
#[derive(Debug, Clone)]
pub struct Network {
    inputs: usize,
    hiddens: usize,
    outputs: usize,
    hidden_weights: Matrix,
    output_weights: Matrix,
    learning_rate: f64,
}

/// Activations of a single forward pass.
struct Forward {
    hidden: Matrix,
    output: Matrix,
}

impl Network {
    /// Builds a network with weights drawn from an entropy-seeded generator.
    pub fn new(inputs: usize, hiddens: usize, outputs: usize, learning_rate: f64) -> Network {
        Network::with_rng(inputs, hiddens, outputs, learning_rate, &mut StdRng::from_entropy())
    }

    /// Reproducible construction for a fixed seed.
    pub fn with_seed(inputs: usize, hiddens: usize, outputs: usize, learning_rate: f64, seed: u64) -> Network {
        Network::with_rng(inputs, hiddens, outputs, learning_rate, &mut StdRng::seed_from_u64(seed))
    }

    /// Panics if any layer is empty or the learning rate is not positive.
    pub fn with_rng<R: Rng + ?Sized>(
        inputs: usize,
        hiddens: usize,
        outputs: usize,
        learning_rate: f64,
        rng: &mut R,
    ) -> Network {
        assert!(inputs > 0 && hiddens > 0 && outputs > 0, "layer sizes must be positive");
        assert!(learning_rate > 0.0, "learning rate must be positive, got {learning_rate}");

        let hidden_weights = random_matrix(hiddens, inputs, rng);
        let output_weights = random_matrix(outputs, hiddens, rng);

        Network { inputs, hiddens, outputs, hidden_weights, output_weights, learning_rate }
    }

    pub fn input_count(&self) -> usize {
        self.inputs
    }

    pub fn hidden_count(&self) -> usize {
        self.hiddens
    }

    pub fn output_count(&self) -> usize {
        self.outputs
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn hidden_weights(&self) -> &Matrix {
        &self.hidden_weights
    }

    pub fn output_weights(&self) -> &Matrix {
        &self.output_weights
    }

    pub fn weights(&self, layer: WeightLayer) -> &Matrix {
        match layer {
            WeightLayer::Hidden => &self.hidden_weights,
            WeightLayer::Output => &self.output_weights,
        }
    }

    /// Shape a matrix must have to stand in for `layer`.
    pub fn expected_shape(&self, layer: WeightLayer) -> (usize, usize) {
        match layer {
            WeightLayer::Hidden => (self.hiddens, self.inputs),
            WeightLayer::Output => (self.outputs, self.hiddens),
        }
    }

    /// Swaps in a new weight matrix. Panics if the shape does not match.
    pub fn replace_weights(&mut self, layer: WeightLayer, weights: Matrix) {
        let expected = self.expected_shape(layer);
        assert_eq!(
            weights.shape(),
            expected,
            "{:?} weights must be {}x{}",
            layer,
            expected.0,
            expected.1
        );
        match layer {
            WeightLayer::Hidden => self.hidden_weights = weights,
            WeightLayer::Output => self.output_weights = weights,
        }
    }

    fn input_column(&self, input: &[f64]) -> Matrix {
        assert_eq!(
            input.len(),
            self.inputs,
            "input has {} values, network expects {}",
            input.len(),
            self.inputs
        );
        Matrix::column(input)
    }

    fn forward(&self, inputs: &Matrix) -> Forward {
        let hidden = self.hidden_weights.dot(inputs).apply_function(sigmoid);
        let output = self.output_weights.dot(&hidden).apply_function(sigmoid);
        Forward { hidden, output }
    }

    /// Forward pass; returns an `output_count x 1` column of activations.
    pub fn predict(&self, input: &[f64]) -> Matrix {
        let inputs = self.input_column(input);
        self.forward(&inputs).output
    }

    /// Index of the strongest output. Ties go to the lowest index.
    pub fn classify(&self, input: &[f64]) -> usize {
        argmax(self.predict(input).as_slice())
    }

    /// Sum of squared differences between the prediction and `target`.
    pub fn squared_error(&self, input: &[f64], target: &[f64]) -> f64 {
        let output = self.predict(input);
        assert_eq!(target.len(), self.outputs, "target has {} values, network expects {}", target.len(), self.outputs);
        output.as_slice().iter().zip(target).map(|(o, t)| {
            let e = t - o;
            e * e
        }).sum()
    }

    /// One online gradient step on a single example.
    pub fn train(&mut self, input: &[f64], target: &[f64]) {
        self.train_with_error(input, target);
    }

    /// Same update as `train`; returns the squared error of the forward pass
    /// that preceded the update.
    pub fn train_with_error(&mut self, input: &[f64], target: &[f64]) -> f64 {
        assert_eq!(
            target.len(),
            self.outputs,
            "target has {} values, network expects {}",
            target.len(),
            self.outputs
        );
        let inputs = self.input_column(input);
        let Forward { hidden, output } = self.forward(&inputs);

        let targets = Matrix::column(target);
        let output_errors = targets.subtract(&output);
        let hidden_errors = self.output_weights.transpose().dot(&output_errors);

        let output_gradient = output_errors
            .multiply(&sigmoid_composite(&output))
            .dot(&hidden.transpose());
        let hidden_gradient = hidden_errors
            .multiply(&sigmoid_composite(&hidden))
            .dot(&inputs.transpose());

        self.output_weights = self.output_weights.add(&output_gradient.scale(self.learning_rate));
        self.hidden_weights = self.hidden_weights.add(&hidden_gradient.scale(self.learning_rate));

        output_errors.as_slice().iter().map(|e| e * e).sum()
    }
}

/// Index of the maximum value in a slice.
pub fn argmax(v: &[f64]) -> usize {
    let mut best = 0;
    for (i, x) in v.iter().enumerate() {
        if *x > v[best] {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shapes_follow_layer_counts() {
        let net = Network::with_seed(4, 3, 2, 0.1, 1);
        assert_eq!(net.hidden_weights().shape(), (3, 4));
        assert_eq!(net.output_weights().shape(), (2, 3));
        assert_eq!((net.input_count(), net.hidden_count(), net.output_count()), (4, 3, 2));
        assert_eq!(net.learning_rate(), 0.1);
    }

    #[test]
    fn smallest_network() {
        let net = Network::with_seed(1, 1, 1, 0.3, 9);
        assert_eq!(net.hidden_weights().shape(), (1, 1));
        assert_eq!(net.output_weights().shape(), (1, 1));
        let out = net.predict(&[0.5]);
        assert_eq!(out.shape(), (1, 1));
    }

    #[test]
    fn predict_is_repeatable() {
        let net = Network::with_seed(3, 5, 2, 0.1, 3);
        let input = [0.2, 0.7, 0.001];
        assert_eq!(net.predict(&input), net.predict(&input));
    }

    #[test]
    fn predict_matches_hand_computation() {
        let mut net = Network::with_seed(2, 1, 1, 0.1, 0);
        net.replace_weights(WeightLayer::Hidden, Matrix::from_vec(1, 2, vec![0.0, 0.0]));
        net.replace_weights(WeightLayer::Output, Matrix::from_vec(1, 1, vec![2.0]));
        // hidden = sigmoid(0) = 0.5, output = sigmoid(1.0)
        let out = net.predict(&[0.3, 0.9]);
        assert_eq!(out.as_slice()[0], sigmoid(0, 0, 1.0));
    }

    #[test]
    fn single_train_step_matches_hand_computation() {
        let mut net = Network::with_seed(1, 1, 1, 0.5, 0);
        net.replace_weights(WeightLayer::Hidden, Matrix::from_vec(1, 1, vec![0.0]));
        net.replace_weights(WeightLayer::Output, Matrix::from_vec(1, 1, vec![0.0]));

        net.train(&[1.0], &[1.0]);

        // hidden = 0.5, output = 0.5, output error = 0.5
        // output gradient = 0.5 * 0.25 * 0.5 = 0.0625 -> w_o = 0.03125
        // hidden error = 0 * 0.5 = 0 -> w_h unchanged
        assert_eq!(net.output_weights().as_slice(), &[0.03125]);
        assert_eq!(net.hidden_weights().as_slice(), &[0.0]);
    }

    #[test]
    fn reported_error_is_measured_before_update() {
        let mut net = Network::with_seed(3, 4, 2, 0.3, 21);
        let input = [0.2, 0.6, 0.9];
        let target = [0.001, 0.999];
        let expected = net.squared_error(&input, &target);
        let reported = net.train_with_error(&input, &target);
        assert_eq!(reported, expected);
        assert!(net.squared_error(&input, &target) < reported);
    }

    #[test]
    fn training_reduces_error() {
        let mut net = Network::with_seed(3, 4, 2, 0.3, 11);
        let input = [0.9, 0.1, 0.5];
        let target = [0.999, 0.001];
        let before = net.squared_error(&input, &target);
        for _ in 0..200 {
            net.train(&input, &target);
        }
        assert!(net.squared_error(&input, &target) < before);
    }

    #[test]
    #[should_panic(expected = "network expects")]
    fn predict_rejects_wrong_length() {
        Network::with_seed(3, 2, 2, 0.1, 0).predict(&[1.0]);
    }

    #[test]
    #[should_panic(expected = "network expects")]
    fn train_rejects_wrong_target_length() {
        Network::with_seed(2, 2, 2, 0.1, 0).train(&[1.0, 0.0], &[1.0]);
    }

    #[test]
    #[should_panic(expected = "weights must be")]
    fn replace_rejects_wrong_shape() {
        Network::with_seed(2, 2, 2, 0.1, 0).replace_weights(WeightLayer::Output, Matrix::zeros(3, 3));
    }

    #[test]
    #[should_panic(expected = "learning rate")]
    fn rejects_non_positive_learning_rate() {
        Network::with_seed(2, 2, 2, 0.0, 0);
    }

    #[test]
    fn argmax_prefers_first_maximum() {
        assert_eq!(argmax(&[0.1, 0.9, 0.9, 0.2]), 1);
        assert_eq!(argmax(&[0.5]), 0);
    }
}
