use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::command::{Hash2kmer, Hash2kmerParams};
use crate::kmer::moltype::MoleculeType;

pub const DEFAULT_KSIZE: usize = 31;

#[derive(Args)]
pub struct Hash2kmerCMD {
    /// File with target hash values, one per line (bare integer or
    /// hashval,abundance CSV)
    pub hashfile: PathBuf,

    /// Sequence files to search; directories are traversed recursively
    #[arg(value_parser = clap::value_parser!(PathBuf), num_args = 1.., required = true)]
    pub seqfiles: Vec<PathBuf>,

    /// Save matching sequences to this FASTA file
    #[arg(long)]
    pub output_sequences: Option<PathBuf>,

    /// Save matching k-mers to this CSV file
    #[arg(long)]
    pub output_kmers: Option<PathBuf>,

    /// Consume protein sequences - no translation needed
    #[arg(long)]
    pub input_is_protein: bool,

    /// Stop after the first found k-mer across all files. Useful if you are
    /// searching for only one k-mer
    #[arg(long)]
    pub first: bool,

    #[arg(short = 'k', long, default_value_t = DEFAULT_KSIZE)]
    pub ksize: usize,

    #[arg(long, value_enum, default_value_t = MoleculeType::Dna)]
    pub molecule: MoleculeType,
}

impl Hash2kmerCMD {
    pub fn try_execute(&mut self) -> Result<()> {
        let params = Hash2kmerParams {
            hashfile: self.hashfile.clone(),
            seqfiles: self.seqfiles.clone(),
            output_sequences: self.output_sequences.clone(),
            output_kmers: self.output_kmers.clone(),
            input_is_protein: self.input_is_protein,
            first: self.first,
            ksize: self.ksize,
            molecule: self.molecule,
        };

        Hash2kmer::run(&params)?;

        log::info!("hash2kmer has finished successfully");
        Ok(())
    }
}
