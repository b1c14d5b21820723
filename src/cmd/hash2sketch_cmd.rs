use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::command::{Hash2sketch, Hash2sketchParams};
use crate::kmer::moltype::MoleculeType;

#[derive(Args)]
pub struct Hash2sketchCMD {
    /// File with hash values, one per line (bare integer, or
    /// hashval,abundance CSV with --track-abundance)
    pub hashfile: PathBuf,

    /// File to write the sketch to
    #[arg(short = 'o', long)]
    pub output: PathBuf,

    #[arg(short = 'k', long)]
    pub ksize: usize,

    /// Keep only hashes below the scaled threshold 2^64/SCALED
    #[arg(long)]
    pub scaled: Option<u64>,

    /// Keep only the NUM smallest hashes
    #[arg(long)]
    pub num: Option<usize>,

    /// Sketch name
    #[arg(long, default_value = "")]
    pub name: String,

    /// Consume protein sequences - no translation needed
    #[arg(long)]
    pub input_is_protein: bool,

    /// The hashfile is a csv containing hashval,abundance on each line;
    /// use that abundance for each hash
    #[arg(long)]
    pub track_abundance: bool,

    #[arg(long, value_enum, default_value_t = MoleculeType::Dna)]
    pub molecule: MoleculeType,
}

impl Hash2sketchCMD {
    pub fn try_execute(&mut self) -> Result<()> {
        let params = Hash2sketchParams {
            hashfile: self.hashfile.clone(),
            output: self.output.clone(),
            ksize: self.ksize,
            scaled: self.scaled,
            num: self.num,
            name: self.name.clone(),
            input_is_protein: self.input_is_protein,
            track_abundance: self.track_abundance,
            molecule: self.molecule,
        };

        Hash2sketch::run(&params)?;

        log::info!("hash2sketch has finished successfully");
        Ok(())
    }
}
