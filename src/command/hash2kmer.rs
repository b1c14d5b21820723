use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::Result;
use bio::io::fasta;

use crate::errors::HashscanError;
use crate::fileformat::{expand_sequence_inputs, open_sequence_file};
use crate::hashes::read_hash_set;
use crate::kmer::moltype::{effective_ksize, MoleculeType};
use crate::kmer::scanner::HashFilteredKmerScanner;

/// Cumulative bp between progress notices on stderr
pub const NOTIFY_EVERY_BP: u64 = 10_000_000;

/// Explicit configuration for one hash2kmer run.
pub struct Hash2kmerParams {
    pub hashfile: PathBuf,
    pub seqfiles: Vec<PathBuf>,
    pub output_sequences: Option<PathBuf>,
    pub output_kmers: Option<PathBuf>,
    pub input_is_protein: bool,
    pub first: bool,
    pub ksize: usize,
    pub molecule: MoleculeType,
}

pub struct Hash2kmer {}

impl Hash2kmer {
    pub fn run(params: &Hash2kmerParams) -> Result<()> {
        // all validation happens before any output file is created
        if params.output_sequences.is_none() && params.output_kmers.is_none() {
            return Err(HashscanError::config("no output options given").into());
        }

        let ksize = effective_ksize(params.ksize, params.molecule)?;

        let hashes = read_hash_set(&params.hashfile)?;
        log::info!(
            "loaded {} distinct hashes from {}",
            hashes.len(),
            params.hashfile.display()
        );

        let scanner = HashFilteredKmerScanner::new(
            ksize,
            params.molecule,
            params.input_is_protein,
            &hashes,
        )?;

        let mut kmerout = match &params.output_kmers {
            Some(path) => {
                let mut w = csv::Writer::from_path(path)?;
                w.write_record(["kmer_in_sequence", "kmer_in_alphabet", "hashval", "read_name"])?;
                Some(w)
            }
            None => None,
        };
        let mut seqout = params
            .output_sequences
            .as_ref()
            .map(|path| File::create(path).map(|f| fasta::Writer::new(BufWriter::new(f))))
            .transpose()?;

        let mut n_bp: u64 = 0; // bp read
        let mut m_bp: u64 = 0; // bp in written matching sequences
        let mut n_seq: u64 = 0;
        let mut n_kmers: u64 = 0;
        let mut watermark = NOTIFY_EVERY_BP;

        'files: for filename in expand_sequence_inputs(&params.seqfiles) {
            let reader = match open_sequence_file(&filename) {
                Ok(reader) => reader,
                Err(e) => {
                    log::warn!(
                        "unable to read {} as a sequence file, skipping ({})",
                        filename.display(),
                        e
                    );
                    continue;
                }
            };

            for record in reader {
                let record = match record {
                    Ok(record) => record,
                    Err(e) => {
                        log::warn!(
                            "bad record in {}, skipping rest of file ({})",
                            filename.display(),
                            e
                        );
                        continue 'files;
                    }
                };

                n_bp += record.sequence.len() as u64;
                n_seq += 1;
                while n_bp >= watermark {
                    eprint!(
                        "... {} sequences, {} bp ({})\r",
                        n_seq,
                        watermark,
                        filename.display()
                    );
                    watermark += NOTIFY_EVERY_BP;
                }

                for found in scanner.scan(&record.sequence) {
                    n_kmers += 1;

                    if let Some(w) = kmerout.as_mut() {
                        let hashval = found.hashval.to_string();
                        w.write_record([
                            found.kmer_in_sequence.as_str(),
                            found.kmer_in_alphabet.as_str(),
                            hashval.as_str(),
                            record.name.as_str(),
                        ])?;
                    }

                    if let Some(w) = seqout.as_mut() {
                        let header = format!(
                            "{}|hashval:{}|kmer:{}|kmer_encoded:{}",
                            record.name,
                            found.hashval,
                            found.kmer_in_sequence,
                            found.kmer_in_alphabet
                        );
                        w.write(&header, None, record.sequence.as_bytes())?;
                        m_bp += record.sequence.len() as u64;
                    }

                    if params.first {
                        break 'files;
                    }
                }
            }
        }

        if let Some(mut w) = kmerout {
            w.flush()?;
            log::info!("read {} bp, found {} kmers matching hashvals", n_bp, n_kmers);
        }
        if let Some(mut w) = seqout {
            w.flush()?;
            log::info!("read {} bp, wrote {} bp in matching sequences", n_bp, m_bp);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kmer::scanner::hash_murmur;
    use std::fs;
    use std::path::Path;

    fn write_file(path: &Path, content: &str) {
        fs::write(path, content).unwrap();
    }

    fn setup(dir: &Path) -> (PathBuf, PathBuf) {
        fs::create_dir_all(dir).unwrap();
        let hashfile = dir.join("hashes.txt");
        write_file(&hashfile, &format!("{}\n", hash_murmur(b"ACGT")));
        let seqfile = dir.join("reads.fasta");
        write_file(&seqfile, ">read1\nACGTACGT\n>read2\nTTTT\n");
        (hashfile, seqfile)
    }

    fn base_params(hashfile: PathBuf, seqfiles: Vec<PathBuf>) -> Hash2kmerParams {
        Hash2kmerParams {
            hashfile,
            seqfiles,
            output_sequences: None,
            output_kmers: None,
            input_is_protein: false,
            first: false,
            ksize: 4,
            molecule: MoleculeType::Dna,
        }
    }

    #[test]
    fn test_no_outputs_is_a_configuration_error() {
        let dir = std::env::temp_dir().join(format!("hashscan-h2k-noout-{}", std::process::id()));
        let (hashfile, seqfile) = setup(&dir);
        let params = base_params(hashfile, vec![seqfile]);
        let err = Hash2kmer::run(&params).unwrap_err();
        fs::remove_dir_all(&dir).ok();
        assert!(err.downcast_ref::<HashscanError>().is_some());
    }

    #[test]
    fn test_kmer_table_written_in_scan_order() {
        let dir = std::env::temp_dir().join(format!("hashscan-h2k-table-{}", std::process::id()));
        let (hashfile, seqfile) = setup(&dir);
        let out = dir.join("kmers.csv");
        let mut params = base_params(hashfile, vec![seqfile]);
        params.output_kmers = Some(out.clone());
        Hash2kmer::run(&params).unwrap();

        let table = fs::read_to_string(&out).unwrap();
        fs::remove_dir_all(&dir).ok();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(
            lines[0],
            "kmer_in_sequence,kmer_in_alphabet,hashval,read_name"
        );
        // ACGT occurs twice in read1, nothing in read2
        assert_eq!(lines.len(), 3);
        let expect = format!("ACGT,ACGT,{},read1", hash_murmur(b"ACGT"));
        assert_eq!(lines[1], expect);
        assert_eq!(lines[2], expect);
    }

    #[test]
    fn test_first_stops_after_one_match() {
        let dir = std::env::temp_dir().join(format!("hashscan-h2k-first-{}", std::process::id()));
        let (hashfile, seqfile) = setup(&dir);
        let out = dir.join("kmers.csv");
        let mut params = base_params(hashfile, vec![seqfile]);
        params.output_kmers = Some(out.clone());
        params.first = true;
        Hash2kmer::run(&params).unwrap();

        let table = fs::read_to_string(&out).unwrap();
        fs::remove_dir_all(&dir).ok();
        assert_eq!(table.lines().count(), 2); // header + one match
    }

    #[test]
    fn test_matching_sequences_reemitted_with_annotation() {
        let dir = std::env::temp_dir().join(format!("hashscan-h2k-seqs-{}", std::process::id()));
        let (hashfile, seqfile) = setup(&dir);
        let out = dir.join("matches.fasta");
        let mut params = base_params(hashfile, vec![seqfile]);
        params.output_sequences = Some(out.clone());
        Hash2kmer::run(&params).unwrap();

        let fastatext = fs::read_to_string(&out).unwrap();
        fs::remove_dir_all(&dir).ok();
        let expect_header = format!(
            ">read1|hashval:{}|kmer:ACGT|kmer_encoded:ACGT",
            hash_murmur(b"ACGT")
        );
        // one record per match, two matches in read1
        assert_eq!(
            fastatext.lines().filter(|l| *l == expect_header).count(),
            2
        );
        assert!(!fastatext.contains("read2"));
    }

    #[test]
    fn test_unreadable_file_is_skipped() {
        let dir = std::env::temp_dir().join(format!("hashscan-h2k-skip-{}", std::process::id()));
        let (hashfile, seqfile) = setup(&dir);
        let junk = dir.join("junk.txt");
        write_file(&junk, "definitely not fasta\n");
        let out = dir.join("kmers.csv");
        let mut params = base_params(hashfile, vec![junk, seqfile]);
        params.output_kmers = Some(out.clone());
        Hash2kmer::run(&params).unwrap();

        let table = fs::read_to_string(&out).unwrap();
        fs::remove_dir_all(&dir).ok();
        assert_eq!(table.lines().count(), 3); // junk skipped, matches still found
    }
}
