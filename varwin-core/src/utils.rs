use std::ffi::OsStr;
use std::fs::File;
use std::io::prelude::*;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::errors::InputError;

/// Layout of an annotation file, decided from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationFormat {
    /// 0-based half-open `chr start end ...`
    Bed,
    /// 1-based inclusive GTF/GFF, coordinates in columns 4 and 5
    Gtf,
}

impl AnnotationFormat {
    pub fn from_path(path: &Path) -> Self {
        let name = path
            .file_name()
            .and_then(OsStr::to_str)
            .unwrap_or_default()
            .to_lowercase();
        let name = name.strip_suffix(".gz").unwrap_or(&name);

        match Path::new(name).extension().and_then(OsStr::to_str) {
            Some("gtf") | Some("gff") | Some("gff3") => AnnotationFormat::Gtf,
            _ => AnnotationFormat::Bed,
        }
    }
}

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>, InputError> {
    let is_gzipped = path.extension() == Some(OsStr::new("gz"));
    let file = File::open(path)
        .map_err(|e| InputError::FileReadError(format!("{}: {}", path.display(), e)))?;
    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    Ok(BufReader::new(file))
}

///
/// Read 1-based variant positions from a plain list or a VCF file.
///
/// Lines starting with `#` are skipped. Tab separated lines with at least two
/// fields take the second one (the VCF `POS` column); otherwise the first
/// whitespace separated field is used. Input order is preserved.
///
pub fn read_positions(path: &Path) -> Result<Vec<u32>, InputError> {
    let reader = get_dynamic_reader(path)?;
    let mut positions: Vec<u32> = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut fields = trimmed.split('\t');
        let first = fields.next().unwrap_or_default();
        let field = match fields.next() {
            Some(pos) => pos,
            None => first.split_whitespace().next().unwrap_or_default(),
        };

        let position = field
            .trim()
            .parse::<u32>()
            .map_err(|e| InputError::ParseError {
                line: line_no + 1,
                message: format!("invalid position {:?}: {}", field, e),
            })?;
        positions.push(position);
    }

    Ok(positions)
}
