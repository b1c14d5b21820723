#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectedFileformat {
    FASTA,
    FASTQ,
    Other,
}

/// Decide the sequence format from the first byte of the decompressed
/// stream. Extensions are unreliable for pipeline intermediates, the
/// leading record marker is not.
pub fn detect_sequence_format(first_byte: u8) -> DetectedFileformat {
    match first_byte {
        b'>' => DetectedFileformat::FASTA,
        b'@' => DetectedFileformat::FASTQ,
        _ => DetectedFileformat::Other,
    }
}
