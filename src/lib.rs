pub mod cmd;
pub mod command;
pub mod errors;
pub mod fileformat;
pub mod hashes;
pub mod kmer;

pub use errors::HashscanError;
pub use kmer::moltype::MoleculeType;
