use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::Result;

use crate::errors::HashscanError;
use crate::hashes::{read_hash_file, HashSketch, SketchSize};
use crate::kmer::moltype::{validate_protein_ksize, MoleculeType};

/// Explicit configuration for one hash2sketch run.
pub struct Hash2sketchParams {
    pub hashfile: PathBuf,
    pub output: PathBuf,
    pub ksize: usize,
    pub scaled: Option<u64>,
    pub num: Option<usize>,
    pub name: String,
    pub input_is_protein: bool,
    pub track_abundance: bool,
    pub molecule: MoleculeType,
}

pub struct Hash2sketch {}

impl Hash2sketch {
    pub fn run(params: &Hash2sketchParams) -> Result<()> {
        // 0 means unset for both sizing options, as in the sketching tools
        let opt_scaled = params.scaled.filter(|&s| s > 0);
        let opt_num = params.num.filter(|&n| n > 0);

        if opt_scaled.is_some() && opt_num.is_some() {
            return Err(HashscanError::config("cannot specify both --num and --scaled").into());
        }

        // ksize counts codons only when the hashes came from translated
        // input; literal protein input keeps its ksize as given
        if !params.input_is_protein {
            validate_protein_ksize(params.ksize, params.molecule)?;
        }

        let hashes = read_hash_file(&params.hashfile, params.track_abundance)?;
        log::info!(
            "loaded {} distinct hashes from {}",
            hashes.len(),
            params.hashfile.display()
        );

        let size = if let Some(scaled) = opt_scaled {
            SketchSize::Scaled(scaled)
        } else if let Some(num) = opt_num {
            SketchSize::Num(num)
        } else {
            log::info!("setting --num automatically from the number of hashes");
            SketchSize::Num(hashes.len())
        };

        let sketch = HashSketch::build(
            params.name.clone(),
            params.ksize,
            params.molecule,
            params.track_abundance,
            size,
            &hashes,
        );

        if sketch.len() < hashes.len() {
            log::warn!(
                "loaded {} hashes, but only {} made it into the sketch",
                hashes.len(),
                sketch.len()
            );
            match size {
                SketchSize::Scaled(scaled) => {
                    log::warn!("this is probably because of --scaled {}", scaled)
                }
                SketchSize::Num(num) => {
                    log::warn!("this is probably because your --num is set to {}", num)
                }
            }
        }
        if let SketchSize::Num(num) = size {
            if num > sketch.len() {
                log::warn!(
                    "--num set to {}, but only {} hashes in sketch",
                    num,
                    sketch.len()
                );
            }
        }

        let out = BufWriter::new(File::create(&params.output)?);
        sketch.write(out)?;
        log::info!("wrote sketch to {}", params.output.display());

        Ok(())
    }
}
