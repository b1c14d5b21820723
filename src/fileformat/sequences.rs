use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use anyhow::{anyhow, bail, Result};
use bio::io::fasta;
use seq_io::fastq::{self, Record as FastqRecord};

use super::detect_fileformat::{detect_sequence_format, DetectedFileformat};

/// One streamed sequence record. Only the header and the residues matter
/// here; qualities are dropped on the floor.
#[derive(Debug, Clone)]
pub struct SequenceRecord {
    pub name: String,
    pub sequence: String,
}

type DecompressedInput = BufReader<Box<dyn Read>>;

/// Streams records from one FASTA or FASTQ file, transparently
/// decompressed. Each record is yielded once and then discarded; callers
/// keep no per-file state besides running tallies.
pub enum SequenceReader {
    Fasta(fasta::Records<DecompressedInput>),
    Fastq(fastq::RecordsIntoIter<DecompressedInput>),
}

/// Open a sequence file for streaming. Unsupported content is an error the
/// caller is expected to log and skip; a broken run of one file must not
/// end the whole search.
pub fn open_sequence_file(path: &Path) -> Result<SequenceReader> {
    let handle = File::open(path)?;
    let (reader, _compression) = niffler::get_reader(Box::new(handle))?;
    let mut buffered = BufReader::new(reader);

    let first_byte = *buffered
        .fill_buf()?
        .first()
        .ok_or_else(|| anyhow!("{} is empty", path.display()))?;

    match detect_sequence_format(first_byte) {
        DetectedFileformat::FASTA => Ok(SequenceReader::Fasta(
            fasta::Reader::from_bufread(buffered).records(),
        )),
        DetectedFileformat::FASTQ => Ok(SequenceReader::Fastq(
            fastq::Reader::new(buffered).into_records(),
        )),
        DetectedFileformat::Other => {
            bail!("{} does not look like FASTA or FASTQ", path.display())
        }
    }
}

impl Iterator for SequenceReader {
    type Item = Result<SequenceRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            SequenceReader::Fasta(records) => records.next().map(|r| {
                let rec = r?;
                let name = match rec.desc() {
                    Some(desc) => format!("{} {}", rec.id(), desc),
                    None => rec.id().to_string(),
                };
                Ok(SequenceRecord {
                    name,
                    sequence: String::from_utf8_lossy(rec.seq()).into_owned(),
                })
            }),
            SequenceReader::Fastq(records) => records.next().map(|r| {
                let rec = r?;
                Ok(SequenceRecord {
                    name: String::from_utf8_lossy(rec.head()).into_owned(),
                    sequence: String::from_utf8_lossy(rec.seq()).into_owned(),
                })
            }),
        }
    }
}
