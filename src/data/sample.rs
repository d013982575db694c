use std::fmt;

/// One labelled training or test example, already encoded for the network.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub label: usize,
    /// Normalized pixels, each in `[0.001, 1.0]`.
    pub input: Vec<f64>,
    /// 0.999 at `label`, 0.001 elsewhere.
    pub target: Vec<f64>,
}

#[derive(Debug)]
pub enum DataError {
    Io(std::io::Error),
    /// A CSV line that cannot be turned into a sample; `line` is 1-based.
    Record { line: usize, reason: String },
    LabelOutOfRange { label: usize, classes: usize },
    Image(String),
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::Io(e) => write!(f, "{}", e),
            DataError::Record { line, reason } => write!(f, "line {}: {}", line, reason),
            DataError::LabelOutOfRange { label, classes } => {
                write!(f, "label {} is outside 0..{}", label, classes)
            }
            DataError::Image(msg) => write!(f, "cannot read image: {}", msg),
        }
    }
}

impl std::error::Error for DataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DataError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DataError {
    fn from(e: std::io::Error) -> Self {
        DataError::Io(e)
    }
}
