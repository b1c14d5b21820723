use thiserror::Error;

/// Errors that end a run before any scanning or sketching starts.
#[derive(Error, Debug)]
pub enum HashscanError {
    /// Invalid combination of options, detected before any work is done
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Protein-family molecule type without --input-is-protein
    #[error("cannot translate DNA to protein sequence; rerun with --input-is-protein")]
    UnsupportedTranslation,

    /// A non-blank hash file line that is neither an integer nor hashval,abundance
    #[error("hash file {file}, line {line}: cannot parse '{content}' as a hash value")]
    HashFileParse {
        file: String,
        line: usize,
        content: String,
    },

    /// The hash file held no usable values, so there is nothing to search for
    #[error("no hashes loaded from {0}")]
    EmptyHashSet(String),
}

impl HashscanError {
    pub fn config(msg: impl Into<String>) -> Self {
        HashscanError::Configuration(msg.into())
    }
}
