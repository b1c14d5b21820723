use std::io::Write;

use anyhow::Result;
use itertools::Itertools;

use crate::hashes::hash_file::HashAbundances;
use crate::kmer::moltype::MoleculeType;

/// How a sketch is size-limited: a fixed cap on the number of (smallest)
/// hashes, or a scaled threshold that keeps every hash below 2^64/scaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SketchSize {
    Num(usize),
    Scaled(u64),
}

/// Largest hash value admitted by a scaled sketch. `scaled` must be
/// nonzero; zero means "no scaled limit" and is resolved by the caller.
pub fn max_hash_for_scaled(scaled: u64) -> u64 {
    u64::MAX / scaled
}

/// A size-limited hash sketch: the surviving hashes with their abundances,
/// in ascending hash order.
pub struct HashSketch {
    pub name: String,
    pub ksize: usize,
    pub moltype: MoleculeType,
    pub track_abundance: bool,
    pub size: SketchSize,
    pub entries: Vec<(u64, u64)>,
}

impl HashSketch {
    pub fn build(
        name: String,
        ksize: usize,
        moltype: MoleculeType,
        track_abundance: bool,
        size: SketchSize,
        hashes: &HashAbundances,
    ) -> HashSketch {
        let sorted = hashes
            .iter()
            .map(|(&h, &a)| (h, a))
            .sorted_by_key(|&(h, _)| h);

        let entries: Vec<(u64, u64)> = match size {
            SketchSize::Scaled(scaled) => {
                let max_hash = max_hash_for_scaled(scaled);
                sorted.filter(|&(h, _)| h <= max_hash).collect()
            }
            SketchSize::Num(num) => sorted.take(num).collect(),
        };

        HashSketch {
            name,
            ksize,
            moltype,
            track_abundance,
            size,
            entries,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write the sketch as a hash/abundance CSV with one parameter comment
    /// line up front. This stays a plain hash list on purpose; signature
    /// container formats belong to the sketching tools themselves.
    pub fn write<W: Write>(&self, mut out: W) -> Result<()> {
        let (num, scaled) = match self.size {
            SketchSize::Num(n) => (n, 0),
            SketchSize::Scaled(s) => (0, s),
        };
        writeln!(
            out,
            "#name={},ksize={},molecule={},num={},scaled={},track_abundance={}",
            self.name, self.ksize, self.moltype, num, scaled, self.track_abundance
        )?;
        let mut w = csv::Writer::from_writer(out);
        w.write_record(["hashval", "abundance"])?;
        for &(hashval, abundance) in &self.entries {
            w.write_record([hashval.to_string(), abundance.to_string()])?;
        }
        w.flush()?;
        Ok(())
    }
}
