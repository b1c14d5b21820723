pub mod hash2kmer;
pub mod hash2sketch;

pub use hash2kmer::{Hash2kmer, Hash2kmerParams};
pub use hash2sketch::{Hash2sketch, Hash2sketchParams};
