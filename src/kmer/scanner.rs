use murmurhash3::murmurhash3_x64_128;
use rustc_hash::FxHashSet;

use crate::errors::HashscanError;
use crate::kmer::moltype::{is_valid_protein, revcomp, MoleculeType};

/// Seed shared with the sketching tools that produced the hash lists.
/// Changing it breaks bit-compatibility with existing hash sets.
pub const MURMUR_SEED: u64 = 42;

/// First 64-bit word of MurmurHash3 x64_128, same contract as the hash
/// behind MinHash sketch construction.
pub fn hash_murmur(kmer: &[u8]) -> u64 {
    murmurhash3_x64_128(kmer, MURMUR_SEED).0
}

/// One window whose hash was found in the target set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KmerMatch {
    /// Canonical encoded form that was actually hashed
    pub kmer_in_alphabet: String,
    /// The window as it appears in the (uppercased) sequence
    pub kmer_in_sequence: String,
    pub hashval: u64,
}

/// Finds the k-mers in a sequence whose canonical form hashes into a fixed
/// target set. The set is read-only and shared across all sequences of a run.
pub struct HashFilteredKmerScanner<'h> {
    ksize: usize,
    moltype: MoleculeType,
    input_is_protein: bool,
    hashes: &'h FxHashSet<u64>,
}

impl<'h> HashFilteredKmerScanner<'h> {
    /// `ksize` is the effective window width (see [`effective_ksize`]).
    ///
    /// Protein-family molecule types require input that is already protein;
    /// translating DNA is not implemented.
    ///
    /// [`effective_ksize`]: crate::kmer::moltype::effective_ksize
    pub fn new(
        ksize: usize,
        moltype: MoleculeType,
        input_is_protein: bool,
        hashes: &'h FxHashSet<u64>,
    ) -> Result<Self, HashscanError> {
        if moltype.is_protein_family() && !input_is_protein {
            return Err(HashscanError::UnsupportedTranslation);
        }
        Ok(HashFilteredKmerScanner {
            ksize,
            moltype,
            input_is_protein,
            hashes,
        })
    }

    /// Canonical encoded form of one window. DNA takes the lexicographically
    /// smaller of the window and its reverse complement, forward winning
    /// ties; protein-family types apply the alphabet reduction instead.
    fn canonicalize(&self, window: &[u8]) -> Vec<u8> {
        match self.moltype {
            MoleculeType::Dna => {
                let rc = revcomp(window);
                if rc.as_slice() < window {
                    rc
                } else {
                    window.to_vec()
                }
            }
            _ => window
                .iter()
                .map(|&c| self.moltype.encode_residue(c))
                .collect(),
        }
    }

    /// Lazily walk every window of the sequence left to right and yield the
    /// ones whose hash is in the target set. A window that repeats yields a
    /// separate match each time; callers that want deduplication do it
    /// themselves.
    pub fn scan<'s>(&'s self, sequence: &str) -> ScanMatches<'s, 'h> {
        let seq = sequence.as_bytes().to_ascii_uppercase();

        // NOTE: the gate covers the whole sequence, not just the current
        // window. A single bad character anywhere suppresses every window of
        // this sequence. Upstream tooling has been known to leak log lines
        // into protein FASTA files, and downstream consumers rely on those
        // records matching nothing.
        let protein_gate_open = !self.input_is_protein || is_valid_protein(&seq);

        let n_windows = if seq.len() >= self.ksize {
            seq.len() - self.ksize + 1
        } else {
            0
        };

        ScanMatches {
            scanner: self,
            seq,
            pos: 0,
            n_windows,
            protein_gate_open,
        }
    }
}

/// Iterator over the matches of one sequence, in scan order.
pub struct ScanMatches<'s, 'h> {
    scanner: &'s HashFilteredKmerScanner<'h>,
    seq: Vec<u8>,
    pos: usize,
    n_windows: usize,
    protein_gate_open: bool,
}

impl<'s, 'h> Iterator for ScanMatches<'s, 'h> {
    type Item = KmerMatch;

    fn next(&mut self) -> Option<KmerMatch> {
        while self.pos < self.n_windows {
            let start = self.pos;
            self.pos += 1;

            if !self.protein_gate_open {
                continue;
            }

            let window = &self.seq[start..start + self.scanner.ksize];
            let encoded = self.scanner.canonicalize(window);

            // Windows with non-alphabet characters are hashed as-is; their
            // hashes will not collide with a real target set by chance.
            let hashval = hash_murmur(&encoded);
            if self.scanner.hashes.contains(&hashval) {
                return Some(KmerMatch {
                    kmer_in_alphabet: String::from_utf8_lossy(&encoded).into_owned(),
                    kmer_in_sequence: String::from_utf8_lossy(window).into_owned(),
                    hashval,
                });
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kmer::moltype::effective_ksize;

    fn hashset_of(kmers: &[&[u8]]) -> FxHashSet<u64> {
        kmers.iter().map(|k| hash_murmur(k)).collect()
    }

    fn match_all_hashes(scanner: &HashFilteredKmerScanner, seq: &str) -> Vec<KmerMatch> {
        scanner.scan(seq).collect()
    }

    /// Target set that matches every possible hash is impossible to build,
    /// so window counting uses a scanner whose canonical forms are all in
    /// the set by construction.
    fn count_windows(seq: &str, ksize: usize) -> usize {
        let mut hashes = FxHashSet::default();
        let up = seq.to_ascii_uppercase();
        if up.len() >= ksize {
            for start in 0..=(up.len() - ksize) {
                let window = &up.as_bytes()[start..start + ksize];
                let rc = revcomp(window);
                let canonical = if rc.as_slice() < window { rc } else { window.to_vec() };
                hashes.insert(hash_murmur(&canonical));
            }
        }
        if hashes.is_empty() {
            // membership is never consulted for a zero-window sequence
            hashes.insert(1);
        }
        let scanner =
            HashFilteredKmerScanner::new(ksize, MoleculeType::Dna, false, &hashes).unwrap();
        scanner.scan(seq).count()
    }

    #[test]
    fn test_window_count() {
        assert_eq!(count_windows("ACGTACGTAC", 4), 7);
        assert_eq!(count_windows("ACGT", 4), 1);
        assert_eq!(count_windows("ACG", 4), 0);
    }

    #[test]
    fn test_canonicalization_idempotent_under_revcomp() {
        let hashes = FxHashSet::default();
        let scanner =
            HashFilteredKmerScanner::new(5, MoleculeType::Dna, false, &hashes).unwrap();
        for kmer in [&b"AACGT"[..], b"TTTTA", b"GATCA", b"CCCCC"] {
            let rc = revcomp(kmer);
            assert_eq!(scanner.canonicalize(kmer), scanner.canonicalize(&rc));
        }
    }

    #[test]
    fn test_acgtacgt_end_to_end() {
        // canonical(ACGT) == ACGT (palindrome); of the 5 windows of
        // ACGTACGT only the two literal ACGT occurrences canonicalize to it
        let hashes = hashset_of(&[b"ACGT"]);
        let scanner =
            HashFilteredKmerScanner::new(4, MoleculeType::Dna, false, &hashes).unwrap();
        let found = match_all_hashes(&scanner, "ACGTACGT");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0], found[1]);
        assert_eq!(found[0].kmer_in_sequence, "ACGT");
        assert_eq!(found[0].kmer_in_alphabet, "ACGT");
        assert_eq!(found[0].hashval, hash_murmur(b"ACGT"));
    }

    #[test]
    fn test_revcomp_strand_matches() {
        // AAAC on the reverse strand appears as GTTT; both canonicalize to
        // AAAC and both windows must be reported
        let hashes = hashset_of(&[b"AAAC"]);
        let scanner =
            HashFilteredKmerScanner::new(4, MoleculeType::Dna, false, &hashes).unwrap();
        let found = match_all_hashes(&scanner, "AAACCGTTT");
        let windows: Vec<&str> = found.iter().map(|m| m.kmer_in_sequence.as_str()).collect();
        assert_eq!(windows, vec!["AAAC", "GTTT"]);
        assert!(found.iter().all(|m| m.kmer_in_alphabet == "AAAC"));
    }

    #[test]
    fn test_lowercase_input_uppercased() {
        let hashes = hashset_of(&[b"ACGT"]);
        let scanner =
            HashFilteredKmerScanner::new(4, MoleculeType::Dna, false, &hashes).unwrap();
        let found = match_all_hashes(&scanner, "acgt");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kmer_in_sequence, "ACGT");
    }

    #[test]
    fn test_scan_is_deterministic() {
        let hashes = hashset_of(&[b"ACGT", b"AAAC"]);
        let scanner =
            HashFilteredKmerScanner::new(4, MoleculeType::Dna, false, &hashes).unwrap();
        let a = match_all_hashes(&scanner, "AAACGTACGTTT");
        let b = match_all_hashes(&scanner, "AAACGTACGTTT");
        assert_eq!(a, b);
        assert!(!a.is_empty());
    }

    #[test]
    fn test_protein_scan_with_encoding() {
        // dayhoff: M->e, K->d, L->e, V->e
        let hashes = hashset_of(&[b"edee"]);
        let scanner =
            HashFilteredKmerScanner::new(4, MoleculeType::Dayhoff, true, &hashes).unwrap();
        let found = match_all_hashes(&scanner, "MKLVW");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kmer_in_alphabet, "edee");
        assert_eq!(found[0].kmer_in_sequence, "MKLV");
    }

    #[test]
    fn test_protein_gate_covers_whole_sequence() {
        // 'Z' sits far away from the valid MKLV window, yet no window of the
        // sequence may match
        let hashes = hashset_of(&[b"MKLV"]);
        let scanner =
            HashFilteredKmerScanner::new(4, MoleculeType::Protein, true, &hashes).unwrap();
        assert_eq!(match_all_hashes(&scanner, "MKLVAAAAZ").len(), 0);
        assert_eq!(match_all_hashes(&scanner, "MKLVAAAA").len(), 1);
    }

    #[test]
    fn test_translation_not_supported() {
        let hashes = hashset_of(&[b"MKLV"]);
        let err = HashFilteredKmerScanner::new(4, MoleculeType::Protein, false, &hashes);
        assert!(matches!(err, Err(HashscanError::UnsupportedTranslation)));
    }

    #[test]
    fn test_first_match_is_lazy() {
        let hashes = hashset_of(&[b"ACGT"]);
        let scanner =
            HashFilteredKmerScanner::new(4, MoleculeType::Dna, false, &hashes).unwrap();
        let mut matches = scanner.scan("ACGTACGTACGTACGT");
        let first = matches.next().unwrap();
        assert_eq!(first.kmer_in_sequence, "ACGT");
        // remaining windows are only visited if the caller keeps pulling
        assert!(matches.next().is_some());
    }

    #[test]
    fn test_effective_ksize_drives_protein_windows() {
        let k = effective_ksize(12, MoleculeType::Protein).unwrap();
        assert_eq!(k, 4);
        let hashes = hashset_of(&[b"MKLV"]);
        let scanner =
            HashFilteredKmerScanner::new(k, MoleculeType::Protein, true, &hashes).unwrap();
        assert_eq!(match_all_hashes(&scanner, "AMKLV").len(), 1);
    }
}
