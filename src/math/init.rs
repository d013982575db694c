use rand::distributions::{Distribution, Uniform};
use rand::Rng;

use crate::math::matrix::Matrix;

/// Draws `count` samples uniformly from `[-1/sqrt(layer_size), 1/sqrt(layer_size)]`.
///
/// `layer_size` is the fan-in of the layer being initialized. Keeping the
/// initial weights in this band keeps the first sigmoid activations away
/// from saturation.
///
/// Panics if `layer_size` is zero.
pub fn random_array<R: Rng + ?Sized>(count: usize, layer_size: usize, rng: &mut R) -> Vec<f64> {
    assert!(layer_size > 0, "layer size must be positive");
    let bound = 1.0 / (layer_size as f64).sqrt();
    let dist = Uniform::new_inclusive(-bound, bound);
    (0..count).map(|_| dist.sample(rng)).collect()
}

/// Random `rows x cols` weight matrix; `cols` is the fan-in.
pub fn random_matrix<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Matrix {
    Matrix::from_vec(rows, cols, random_array(rows * cols, cols, rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn samples_stay_within_fan_in_bound() {
        let mut rng = StdRng::seed_from_u64(7);
        let values = random_array(10_000, 784, &mut rng);
        let bound = 1.0 / 28.0;
        assert_eq!(values.len(), 10_000);
        assert!(values.iter().all(|v| v.abs() <= bound));
        // Not degenerate: both signs show up.
        assert!(values.iter().any(|v| *v > 0.0));
        assert!(values.iter().any(|v| *v < 0.0));
    }

    #[test]
    fn same_seed_same_weights() {
        let a = random_matrix(3, 4, &mut StdRng::seed_from_u64(42));
        let b = random_matrix(3, 4, &mut StdRng::seed_from_u64(42));
        let c = random_matrix(3, 4, &mut StdRng::seed_from_u64(43));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.shape(), (3, 4));
    }

    #[test]
    fn single_input_layer_uses_unit_bound() {
        let values = random_array(100, 1, &mut StdRng::seed_from_u64(1));
        assert!(values.iter().all(|v| (-1.0..=1.0).contains(v)));
    }
}
