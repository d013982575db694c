use crate::data::sample::DataError;

const FLOOR: f64 = 0.001;
const CEILING: f64 = 0.999;

/// Maps a raw intensity in `[0, 255]` into `[0.001, 1.0]`.
///
/// Zero never reaches the network, so every input still carries some signal
/// through the bias-free weights.
pub fn normalize_pixel(p: f64) -> f64 {
    (p / 255.0) * CEILING + FLOOR
}

/// Target vector for `label`: 0.999 at the label, 0.001 everywhere else.
/// Sigmoid outputs never reach exactly 0 or 1.
pub fn target_vector(label: usize, classes: usize) -> Result<Vec<f64>, DataError> {
    if label >= classes {
        return Err(DataError::LabelOutOfRange { label, classes });
    }
    let mut target = vec![FLOOR; classes];
    target[label] = CEILING;
    Ok(target)
}
