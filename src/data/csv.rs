//! Reader for the MNIST CSV layout: one sample per line, the class label in
//! the first column followed by one column per pixel (0-255).
//!
//! A first line whose label cell is not numeric is treated as a header and
//! skipped. Blank lines are ignored.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use tracing::debug;

use crate::data::encoding::{normalize_pixel, target_vector};
use crate::data::sample::{DataError, Sample};

/// Parses one CSV line into a sample. `line_no` is only used in errors.
pub fn parse_record(
    line: &str,
    line_no: usize,
    input_count: usize,
    output_count: usize,
) -> Result<Sample, DataError> {
    let record_err = |reason: String| DataError::Record { line: line_no, reason };

    let cells: Vec<&str> = line.split(',').map(str::trim).collect();
    if cells.len() != input_count + 1 {
        return Err(record_err(format!(
            "expected {} columns (label + {} pixels), got {}",
            input_count + 1,
            input_count,
            cells.len()
        )));
    }

    let label: usize = cells[0].parse().map_err(|_| {
        record_err(format!("label '{}' is not a non-negative integer", cells[0]))
    })?;
    let target = target_vector(label, output_count).map_err(|e| record_err(e.to_string()))?;

    let input = cells[1..]
        .iter()
        .enumerate()
        .map(|(col, cell)| {
            let p: f64 = cell.parse().map_err(|_| {
                record_err(format!("pixel {} value '{}' is not a number", col, cell))
            })?;
            Ok(normalize_pixel(p))
        })
        .collect::<Result<Vec<f64>, DataError>>()?;

    Ok(Sample { label, input, target })
}

/// Streams samples from a CSV file one line at a time.
pub struct SampleReader {
    lines: Lines<BufReader<File>>,
    line_no: usize,
    input_count: usize,
    output_count: usize,
}

impl SampleReader {
    pub fn open(path: &Path, input_count: usize, output_count: usize) -> Result<SampleReader, DataError> {
        let file = File::open(path)?;
        debug!(path = %path.display(), "opened sample file");
        Ok(SampleReader {
            lines: BufReader::new(file).lines(),
            line_no: 0,
            input_count,
            output_count,
        })
    }
}

impl Iterator for SampleReader {
    type Item = Result<Sample, DataError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(DataError::Io(e))),
            };
            self.line_no += 1;

            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if self.line_no == 1 && is_header(line) {
                debug!("skipping header row");
                continue;
            }
            return Some(parse_record(line, self.line_no, self.input_count, self.output_count));
        }
    }
}

/// Reads every sample from a CSV file into memory.
pub fn read_samples(
    path: &Path,
    input_count: usize,
    output_count: usize,
) -> Result<Vec<Sample>, DataError> {
    let samples = SampleReader::open(path, input_count, output_count)?
        .collect::<Result<Vec<Sample>, DataError>>()?;
    debug!(path = %path.display(), count = samples.len(), "read samples");
    Ok(samples)
}

/// A header row is recognised by its label cell alone; a data row with a
/// bad pixel is still reported as an error.
fn is_header(line: &str) -> bool {
    let label = line.split(',').next().unwrap_or("").trim();
    !label.is_empty() && label.parse::<f64>().is_err()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_first_then_pixels() {
        let sample = parse_record("3,0,255,51", 1, 3, 5).unwrap();
        assert_eq!(sample.label, 3);
        assert_eq!(sample.target, vec![0.001, 0.001, 0.001, 0.999, 0.001]);
        assert_eq!(sample.input.len(), 3);
        assert_eq!(sample.input[0], 0.001);
        assert!((sample.input[1] - 1.0).abs() < 1e-12);
        assert!((sample.input[2] - (0.2 * 0.999 + 0.001)).abs() < 1e-12);
    }

    #[test]
    fn wrong_column_count_names_line() {
        let err = parse_record("1,0,0", 7, 3, 10).unwrap_err();
        assert!(matches!(err, DataError::Record { line: 7, .. }));
        assert!(err.to_string().starts_with("line 7:"));
    }

    #[test]
    fn bad_cells_are_rejected() {
        assert!(parse_record("x,0,0,0", 1, 3, 10).is_err());
        assert!(parse_record("1,0,abc,0", 1, 3, 10).is_err());
        assert!(parse_record("12,0,0,0", 1, 3, 10).is_err());
    }

    #[test]
    fn file_with_header_and_blank_lines() {
        let dir = std::env::temp_dir().join(format!("nobias-csv-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("set.csv");
        std::fs::write(&path, "label,p0,p1\n1,0,255\n\n0,255,0\n").unwrap();

        let samples = read_samples(&path, 2, 2).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].label, 1);
        assert_eq!(samples[1].label, 0);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn bad_first_row_is_an_error_not_a_header() {
        let dir = std::env::temp_dir().join(format!("nobias-csv-first-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("set.csv");
        std::fs::write(&path, "1,0,abc\n0,255,0\n").unwrap();

        let err = read_samples(&path, 2, 2).unwrap_err();
        assert!(matches!(err, DataError::Record { line: 1, .. }), "{err}");
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn reader_yields_rows_lazily() {
        let dir = std::env::temp_dir().join(format!("nobias-csv-lazy-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("set.csv");
        std::fs::write(&path, "1,0,255\n0,bad,0\n0,255,0\n").unwrap();

        let mut reader = SampleReader::open(&path, 2, 2).unwrap();
        assert_eq!(reader.next().unwrap().unwrap().label, 1);
        assert!(matches!(reader.next().unwrap(), Err(DataError::Record { line: 2, .. })));
        assert_eq!(reader.next().unwrap().unwrap().label, 0);
        assert!(reader.next().is_none());
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_file_is_io_error() {
        let path = std::env::temp_dir().join("nobias-definitely-missing.csv");
        assert!(matches!(read_samples(&path, 2, 2), Err(DataError::Io(_))));
    }
}
