use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::Result;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::errors::HashscanError;

/// Hash values with per-hash abundances. Duplicate hash lines collapse,
/// last abundance wins.
pub type HashAbundances = FxHashMap<u64, u64>;

/// Load a plain target hash set: one value per line, either a bare integer
/// or a CSV line whose first column is the hash (abundance ignored). Blank
/// lines are skipped; anything else fails the load.
pub fn load_hash_set<R: BufRead>(reader: R, filename: &str) -> Result<FxHashSet<u64>> {
    let mut hashes = FxHashSet::default();
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let first_field = line.split(',').next().unwrap_or(line);
        let hashval = first_field
            .parse::<u64>()
            .map_err(|_| HashscanError::HashFileParse {
                file: filename.to_string(),
                line: lineno + 1,
                content: line.to_string(),
            })?;
        hashes.insert(hashval);
    }
    Ok(hashes)
}

/// Load hashval,abundance CSV lines. Both columns must be integers on every
/// non-blank line.
pub fn load_hash_abundances<R: BufRead>(reader: R, filename: &str) -> Result<HashAbundances> {
    let mut hashes = HashAbundances::default();
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let parse_err = || HashscanError::HashFileParse {
            file: filename.to_string(),
            line: lineno + 1,
            content: line.to_string(),
        };
        let mut fields = line.split(',');
        let hashval: u64 = fields
            .next()
            .and_then(|f| f.trim().parse().ok())
            .ok_or_else(parse_err)?;
        let abundance: u64 = fields
            .next()
            .and_then(|f| f.trim().parse().ok())
            .ok_or_else(parse_err)?;
        hashes.insert(hashval, abundance);
    }
    Ok(hashes)
}

/// Open a hash file as a plain membership set. Fatal when nothing loads;
/// an empty target set has nothing to search for.
pub fn read_hash_set(path: &Path) -> Result<FxHashSet<u64>> {
    let filename = path.display().to_string();
    let reader = BufReader::new(File::open(path)?);
    let hashes = load_hash_set(reader, &filename)?;
    if hashes.is_empty() {
        return Err(HashscanError::EmptyHashSet(filename).into());
    }
    Ok(hashes)
}

/// Open a hash file and load it as an abundance map. Without abundance
/// tracking every hash gets abundance 1.
pub fn read_hash_file(path: &Path, track_abundance: bool) -> Result<HashAbundances> {
    let filename = path.display().to_string();
    let reader = BufReader::new(File::open(path)?);
    let hashes = if track_abundance {
        load_hash_abundances(reader, &filename)?
    } else {
        load_hash_set(reader, &filename)?
            .into_iter()
            .map(|h| (h, 1))
            .collect()
    };
    if hashes.is_empty() {
        return Err(HashscanError::EmptyHashSet(filename).into());
    }
    Ok(hashes)
}
