pub mod detect_fileformat;
pub mod sequences;
pub mod traverse;

pub use detect_fileformat::DetectedFileformat;
pub use sequences::{open_sequence_file, SequenceReader, SequenceRecord};
pub use traverse::expand_sequence_inputs;
