pub mod hash2kmer_cmd;
pub mod hash2sketch_cmd;

pub use hash2kmer_cmd::Hash2kmerCMD;
pub use hash2sketch_cmd::Hash2sketchCMD;
