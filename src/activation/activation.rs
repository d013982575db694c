use std::f64::consts::E;

use crate::math::matrix::Matrix;

/// Logistic function, `1 / (1 + e^-z)`.
///
/// Takes the element position so it can be handed straight to
/// `Matrix::apply_function`; the position is ignored.
pub fn sigmoid(_row: usize, _col: usize, z: f64) -> f64 {
    1.0 / (1.0 + E.powf(-z))
}

/// `m ⊙ (1 - m)` for a matrix of sigmoid outputs, i.e. the sigmoid
/// derivative expressed in terms of the activation itself.
pub fn sigmoid_composite(m: &Matrix) -> Matrix {
    m.multiply(&m.scale(-1.0).add_scalar(1.0))
}
