pub mod matrix;
pub mod init;

pub use matrix::Matrix;
pub use init::{random_array, random_matrix};
