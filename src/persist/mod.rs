pub mod codec;
pub mod store;

pub use codec::{read_matrix, write_matrix, PersistError};
pub use store::{load, save, artifact_path, LoadOutcome, LoadReport, SaveReport, HIDDEN_ARTIFACT, OUTPUT_ARTIFACT};
