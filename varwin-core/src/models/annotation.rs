use std::cmp::Ordering;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use crate::errors::{InputError, WindowError};
use crate::utils::{AnnotationFormat, get_dynamic_reader};

///
/// Annotated (e.g. genic) interval, 1-based and inclusive on both ends.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Annotation {
    pub start: u32,
    pub end: u32,
}

impl Annotation {
    pub fn new(start: u32, end: u32) -> Self {
        Annotation { start, end }
    }

    /// Reject intervals that are inverted or start at coordinate 0.
    pub fn validate(&self) -> Result<(), WindowError> {
        if self.start == 0 {
            return Err(WindowError::InvalidArgument(format!(
                "annotation {}-{} starts at 0; coordinates are 1-based",
                self.start, self.end
            )));
        }
        if self.start > self.end {
            return Err(WindowError::InvalidArgument(format!(
                "annotation start {} is greater than its end {}",
                self.start, self.end
            )));
        }
        Ok(())
    }
}

impl Ord for Annotation {
    #[inline]
    fn cmp(&self, other: &Annotation) -> Ordering {
        match self.start.cmp(&other.start) {
            Ordering::Equal => self.end.cmp(&other.end),
            ord => ord,
        }
    }
}

impl PartialOrd for Annotation {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

///
/// Merge overlapping and abutting intervals into their union.
///
/// Intervals must already be valid (see [`Annotation::validate`]). The result is
/// sorted by start and pairwise disjoint with at least one uncovered position
/// between consecutive intervals.
///
pub fn reduce(annotations: &[Annotation]) -> Vec<Annotation> {
    let mut sorted = annotations.to_vec();
    sorted.sort_unstable();

    let mut merged: Vec<Annotation> = Vec::with_capacity(sorted.len());
    for ann in sorted {
        if let Some(current) = merged.last_mut() {
            if ann.start <= current.end.saturating_add(1) {
                current.end = current.end.max(ann.end);
                continue;
            }
        }
        merged.push(ann);
    }
    merged
}

///
/// AnnotationSet struct, the annotation intervals of one coordinate space
/// loaded from a BED or GTF/GFF file.
///
#[derive(Clone, Debug, Default)]
pub struct AnnotationSet {
    pub annotations: Vec<Annotation>,
    pub path: Option<PathBuf>,
}

impl AnnotationSet {
    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Largest end coordinate in the set.
    pub fn max_end(&self) -> Option<u32> {
        self.annotations.iter().map(|a| a.end).max()
    }
}

impl TryFrom<&Path> for AnnotationSet {
    type Error = InputError;

    ///
    /// Create a new [AnnotationSet] from a BED or GTF/GFF file.
    ///
    /// BED coordinates (0-based, half-open) are shifted to 1-based inclusive.
    /// GTF/GFF coordinates are already 1-based inclusive and kept as-is.
    /// Only the coordinate columns are read; the sequence name is ignored.
    fn try_from(value: &Path) -> Result<Self, InputError> {
        let format = AnnotationFormat::from_path(value);
        let reader = get_dynamic_reader(value)?;

        let (start_col, end_col) = match format {
            AnnotationFormat::Bed => (1, 2),
            AnnotationFormat::Gtf => (3, 4),
        };

        let mut annotations: Vec<Annotation> = Vec::new();

        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim_end();

            if trimmed.is_empty()
                || trimmed.starts_with('#')
                || trimmed.starts_with("track")
                || trimmed.starts_with("browser")
            {
                continue;
            }

            let parts: Vec<&str> = trimmed.split('\t').collect();
            if parts.len() <= end_col {
                return Err(InputError::ParseError {
                    line: line_no + 1,
                    message: format!("expected at least {} columns: {:?}", end_col + 1, trimmed),
                });
            }

            let parse = |col: usize| {
                parts[col]
                    .trim()
                    .parse::<u32>()
                    .map_err(|e| InputError::ParseError {
                        line: line_no + 1,
                        message: format!("invalid coordinate {:?}: {}", parts[col], e),
                    })
            };
            let start = parse(start_col)?;
            let end = parse(end_col)?;

            let start = match format {
                AnnotationFormat::Bed => start.saturating_add(1),
                AnnotationFormat::Gtf => start,
            };

            annotations.push(Annotation { start, end });
        }

        Ok(AnnotationSet {
            annotations,
            path: Some(value.to_owned()),
        })
    }
}

impl TryFrom<&str> for AnnotationSet {
    type Error = InputError;

    fn try_from(value: &str) -> Result<Self, InputError> {
        AnnotationSet::try_from(Path::new(value))
    }
}
