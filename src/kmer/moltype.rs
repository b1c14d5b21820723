use clap::ValueEnum;

use crate::errors::HashscanError;

/// The 20 canonical amino acid single-letter codes. Sequences claiming to be
/// protein are gated against this alphabet before any window can match.
pub const AMINO_ACID_SINGLE_LETTERS: &[u8] = b"ACDEFGHIKLMNPQRSTVWY";

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum MoleculeType {
    Dna,
    Protein,
    Dayhoff,
    Hp,
}

impl MoleculeType {
    /// Protein, Dayhoff and HP all consume amino acid input; DNA does not.
    pub fn is_protein_family(&self) -> bool {
        !matches!(self, MoleculeType::Dna)
    }

    /// Collapse one amino acid into this molecule type's alphabet.
    /// Unknown residues become 'X' and will hash to values that have no
    /// reason to be in any target set.
    pub fn encode_residue(&self, aa: u8) -> u8 {
        match self {
            MoleculeType::Dna | MoleculeType::Protein => aa,
            MoleculeType::Dayhoff => match aa {
                b'C' => b'a',
                b'A' | b'G' | b'P' | b'S' | b'T' => b'b',
                b'D' | b'E' | b'N' | b'Q' => b'c',
                b'H' | b'K' | b'R' => b'd',
                b'I' | b'L' | b'M' | b'V' => b'e',
                b'F' | b'W' | b'Y' => b'f',
                _ => b'X',
            },
            MoleculeType::Hp => match aa {
                b'A' | b'F' | b'G' | b'I' | b'L' | b'M' | b'P' | b'V' | b'W' | b'Y' => b'h',
                b'C' | b'D' | b'E' | b'H' | b'K' | b'N' | b'Q' | b'R' | b'S' | b'T' => b'p',
                _ => b'X',
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MoleculeType::Dna => "dna",
            MoleculeType::Protein => "protein",
            MoleculeType::Dayhoff => "dayhoff",
            MoleculeType::Hp => "hp",
        }
    }
}

impl std::fmt::Display for MoleculeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Protein-family k-mer sizes are given in nucleotide (codon) units and must
/// divide evenly by 3. Checked once up front, never in the scan loop.
pub fn validate_protein_ksize(ksize: usize, moltype: MoleculeType) -> Result<(), HashscanError> {
    if moltype.is_protein_family() && ksize % 3 != 0 {
        return Err(HashscanError::config(format!(
            "protein ksizes must be divisible by 3, sorry! bad ksize: {}",
            ksize
        )));
    }
    Ok(())
}

/// Window width actually slid over the sequence: unchanged for DNA, divided
/// by 3 for protein-family types since those ksizes count codons.
pub fn effective_ksize(ksize: usize, moltype: MoleculeType) -> Result<usize, HashscanError> {
    validate_protein_ksize(ksize, moltype)?;
    if moltype.is_protein_family() {
        Ok(ksize / 3)
    } else {
        Ok(ksize)
    }
}

/// Reverse complement of an uppercased nucleotide k-mer. Bytes outside ACGT
/// map to themselves; the resulting k-mer simply will not hash into any
/// target set.
pub fn revcomp(kmer: &[u8]) -> Vec<u8> {
    kmer.iter()
        .rev()
        .map(|&c| match c {
            b'A' => b'T',
            b'T' => b'A',
            b'C' => b'G',
            b'G' => b'C',
            other => other,
        })
        .collect()
}

/// True when every character belongs to the 20-letter amino acid alphabet.
pub fn is_valid_protein(sequence: &[u8]) -> bool {
    sequence
        .iter()
        .all(|c| AMINO_ACID_SINGLE_LETTERS.contains(c))
}
