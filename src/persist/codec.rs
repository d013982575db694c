//! Binary encoding of a single weight matrix.
//!
//! ```text
//! bytes 0-7:    rows  (i64, little-endian)
//! bytes 8-15:   cols  (i64, little-endian)
//! bytes 16..:   rows * cols f64 values, little-endian IEEE-754, row-major
//! ```
//!
//! There is no magic number, version or checksum. Whoever reads an artifact
//! is responsible for checking that its shape fits the network.

use std::fmt;
use std::io::{self, Read, Write};

use crate::math::matrix::Matrix;

#[derive(Debug)]
pub enum PersistError {
    Io(io::Error),
    /// Header or payload does not describe a valid matrix.
    Malformed(String),
    /// Well-formed matrix whose shape does not fit the target layer.
    ShapeMismatch { expected: (usize, usize), found: (usize, usize) },
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistError::Io(e) => write!(f, "{}", e),
            PersistError::Malformed(msg) => write!(f, "malformed weight artifact: {}", msg),
            PersistError::ShapeMismatch { expected, found } => write!(
                f,
                "weight artifact is {}x{}, network expects {}x{}",
                found.0, found.1, expected.0, expected.1
            ),
        }
    }
}

impl std::error::Error for PersistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for PersistError {
    fn from(e: io::Error) -> Self {
        PersistError::Io(e)
    }
}

pub fn write_matrix<W: Write>(writer: &mut W, matrix: &Matrix) -> Result<(), PersistError> {
    let (rows, cols) = matrix.shape();
    writer.write_all(&(rows as i64).to_le_bytes())?;
    writer.write_all(&(cols as i64).to_le_bytes())?;
    for value in matrix.as_slice() {
        writer.write_all(&value.to_le_bytes())?;
    }
    writer.flush()?;
    Ok(())
}

pub fn read_matrix<R: Read>(reader: &mut R) -> Result<Matrix, PersistError> {
    let rows = read_dimension(reader, "rows")?;
    let cols = read_dimension(reader, "cols")?;

    let count = rows.checked_mul(cols).ok_or_else(|| {
        PersistError::Malformed(format!("{}x{} overflows the element count", rows, cols))
    })?;
    let byte_len = count.checked_mul(8).ok_or_else(|| {
        PersistError::Malformed(format!("{} elements overflow the payload size", count))
    })?;

    // Read through `take` so a bogus header cannot force a huge allocation up front.
    let mut payload = Vec::new();
    reader.by_ref().take(byte_len as u64).read_to_end(&mut payload)?;
    if payload.len() != byte_len {
        return Err(PersistError::Malformed(format!(
            "expected {} bytes of elements for {}x{}, found {}",
            byte_len, rows, cols, payload.len()
        )));
    }

    let data = payload
        .chunks_exact(8)
        .map(|chunk| {
            let mut buf = [0u8; 8];
            buf.copy_from_slice(chunk);
            f64::from_le_bytes(buf)
        })
        .collect();

    Ok(Matrix::from_vec(rows, cols, data))
}

fn read_dimension<R: Read>(reader: &mut R, name: &str) -> Result<usize, PersistError> {
    let mut buf = [0u8; 8];
    reader.read_exact(&mut buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => PersistError::Malformed(format!("header ends before {}", name)),
        _ => PersistError::Io(e),
    })?;
    let value = i64::from_le_bytes(buf);
    usize::try_from(value)
        .map_err(|_| PersistError::Malformed(format!("{} is negative ({})", name, value)))
}
