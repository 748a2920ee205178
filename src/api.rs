//! API facade module
//
// Path-level conversion surface over the container extractor. Opens the
// input and output files, runs the extraction over buffered IO, and removes
// the output file again when the conversion fails or produces nothing.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::formats::{extract_first_animation, Extraction, FormatError};

/// Errors surfaced by a whole-file conversion
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("File not found: {path}: {source}")]
    InputOpen {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("File could not be created: {path}: {source}")]
    OutputCreate {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Container error: {0}")]
    Format(#[from] FormatError),
}

/// Convert one container file into one image file.
///
/// The output file is created up front and removed again when the extraction
/// fails or finds no animation block, so a failed or empty conversion never
/// leaves a zero-byte file behind. Both handles are scope-bound and released
/// on every exit path.
pub fn convert_file(input: &Path, output: &Path) -> Result<Extraction, ConvertError> {
    let in_file = File::open(input).map_err(|source| ConvertError::InputOpen {
        path: input.to_path_buf(),
        source,
    })?;
    let out_file = File::create(output).map_err(|source| ConvertError::OutputCreate {
        path: output.to_path_buf(),
        source,
    })?;

    let result = {
        let mut reader = BufReader::new(in_file);
        let mut writer = BufWriter::new(out_file);
        extract_first_animation(&mut reader, &mut writer).and_then(|extraction| {
            writer.flush()?;
            Ok(extraction)
        })
    };

    match result {
        Ok(extraction) => {
            if extraction.image_bytes.is_none() {
                log::warn!("no animation block in {}", input.display());
                remove_output(output);
            }
            Ok(extraction)
        }
        Err(err) => {
            remove_output(output);
            Err(err.into())
        }
    }
}

fn remove_output(path: &Path) {
    if let Err(err) = fs::remove_file(path) {
        log::warn!(
            "could not remove incomplete output {}: {}",
            path.display(),
            err
        );
    }
}
