pub mod sample;
pub mod encoding;
pub mod csv;
pub mod image;

pub use sample::{Sample, DataError};
pub use encoding::{normalize_pixel, target_vector};
pub use self::csv::{parse_record, read_samples, SampleReader};
pub use self::image::{image_to_input, image_bytes_to_input};
