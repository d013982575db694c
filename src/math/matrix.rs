use std::ops::{Add, Sub, Mul};

/// Dense row-major matrix of `f64`.
///
/// Every operation returns a new matrix and leaves its operands untouched.
/// Shape mismatches are programming errors and panic.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix::filled(rows, cols, 0.0)
    }

    pub fn filled(rows: usize, cols: usize, value: f64) -> Matrix {
        Matrix { rows, cols, data: vec![value; rows * cols] }
    }

    /// Wraps a row-major buffer. Panics if `data.len() != rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Matrix {
        assert_eq!(
            data.len(),
            rows * cols,
            "buffer of {} elements cannot form a {}x{} matrix",
            data.len(),
            rows,
            cols
        );
        Matrix { rows, cols, data }
    }

    /// Builds an `n x 1` column vector.
    pub fn column(values: &[f64]) -> Matrix {
        Matrix::from_vec(values.len(), 1, values.to_vec())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        assert!(row < self.rows && col < self.cols, "index ({row}, {col}) out of bounds for {}x{}", self.rows, self.cols);
        self.data[row * self.cols + col]
    }

    /// Row-major view of the elements.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn transpose(&self) -> Matrix {
        let mut res = Matrix::zeros(self.cols, self.rows);

        for i in 0..self.rows {
            for j in 0..self.cols {
                res.data[j * self.rows + i] = self.data[i * self.cols + j];
            }
        }

        res
    }

    /// Matrix product. Requires `self.cols == rhs.rows`.
    pub fn dot(&self, rhs: &Matrix) -> Matrix {
        if self.cols != rhs.rows {
            panic!(
                "cannot multiply {}x{} by {}x{}",
                self.rows, self.cols, rhs.rows, rhs.cols
            )
        }

        let mut res = Matrix::zeros(self.rows, rhs.cols);

        for i in 0..self.rows {
            for k in 0..self.cols {
                let a = self.data[i * self.cols + k];
                let rhs_row = &rhs.data[k * rhs.cols..(k + 1) * rhs.cols];
                let out_row = &mut res.data[i * rhs.cols..(i + 1) * rhs.cols];
                for (out, b) in out_row.iter_mut().zip(rhs_row) {
                    *out += a * b;
                }
            }
        }

        res
    }

    /// Element-wise map; `functor` receives `(row, col, value)`.
    pub fn apply_function<F>(&self, functor: F) -> Matrix
    where
        F: Fn(usize, usize, f64) -> f64,
    {
        let cols = self.cols;
        let data = self.data
            .iter()
            .enumerate()
            .map(|(idx, &x)| functor(idx / cols, idx % cols, x))
            .collect();
        Matrix { rows: self.rows, cols: self.cols, data }
    }

    /// Element-wise (Hadamard) product.
    pub fn multiply(&self, rhs: &Matrix) -> Matrix {
        self.zip_with(rhs, |a, b| a * b)
    }

    pub fn add(&self, rhs: &Matrix) -> Matrix {
        self.zip_with(rhs, |a, b| a + b)
    }

    /// `self - rhs`, element-wise.
    pub fn subtract(&self, rhs: &Matrix) -> Matrix {
        self.zip_with(rhs, |a, b| a - b)
    }

    pub fn scale(&self, scalar: f64) -> Matrix {
        self.apply_function(|_, _, x| x * scalar)
    }

    pub fn add_scalar(&self, scalar: f64) -> Matrix {
        self.apply_function(|_, _, x| x + scalar)
    }

    fn zip_with<F>(&self, rhs: &Matrix, op: F) -> Matrix
    where
        F: Fn(f64, f64) -> f64,
    {
        if self.shape() != rhs.shape() {
            panic!(
                "element-wise operation on mismatched shapes {}x{} and {}x{}",
                self.rows, self.cols, rhs.rows, rhs.cols
            )
        }

        let data = self.data.iter().zip(&rhs.data).map(|(&a, &b)| op(a, b)).collect();
        Matrix { rows: self.rows, cols: self.cols, data }
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix { rows: 0, cols: 0, data: vec![] }
    }
}

impl Add for &Matrix {
    type Output = Matrix;

    fn add(self, rhs: Self) -> Self::Output {
        Matrix::add(self, rhs)
    }
}

impl Sub for &Matrix {
    type Output = Matrix;

    fn sub(self, rhs: Self) -> Self::Output {
        self.subtract(rhs)
    }
}

impl Mul for &Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Self) -> Self::Output {
        self.dot(rhs)
    }
}
