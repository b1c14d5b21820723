pub mod hash_file;
pub mod sketch;

pub use hash_file::{
    load_hash_abundances, load_hash_set, read_hash_file, read_hash_set, HashAbundances,
};
pub use sketch::{max_hash_for_scaled, HashSketch, SketchSize};
