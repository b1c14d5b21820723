pub mod moltype;
pub mod scanner;

pub use moltype::{effective_ksize, validate_protein_ksize, MoleculeType};
pub use scanner::{hash_murmur, HashFilteredKmerScanner, KmerMatch, MURMUR_SEED};
