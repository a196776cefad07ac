//! Per-window count of annotated (genic) positions.

use log::{debug, warn};
use varwin_core::errors::WindowError;
use varwin_core::models::WindowTable;
use varwin_core::models::annotation::{Annotation, reduce};

use crate::config::OutOfRangePolicy;
use crate::result::{AggregationResult, CountColumn};

pub const GENIC_COLUMN: &str = "genic";

///
/// Count, for every window, the positions covered by at least one annotation.
/// Fails on annotations reaching past the end of the table.
///
pub fn aggregate_annotations(
    table: &WindowTable,
    annotations: &[Annotation],
) -> Result<AggregationResult, WindowError> {
    aggregate_annotations_with_policy(table, annotations, OutOfRangePolicy::Fail)
}

///
/// Count, for every window, the positions covered by at least one annotation.
///
/// Annotations are validated up front (`start <= end`, `start >= 1`), merged
/// into their union so overlaps are not double counted, and swept against the
/// windows with two forward cursors. Annotations reaching past the table's
/// covered span fail ([OutOfRangePolicy::Fail]) or are clipped to it
/// ([OutOfRangePolicy::Drop]).
///
pub fn aggregate_annotations_with_policy(
    table: &WindowTable,
    annotations: &[Annotation],
    policy: OutOfRangePolicy,
) -> Result<AggregationResult, WindowError> {
    for ann in annotations {
        ann.validate()?;
    }

    let last_end = table.last_end();
    let mut in_span: Vec<Annotation> = Vec::with_capacity(annotations.len());
    let mut clipped = 0usize;

    for ann in annotations {
        if ann.end <= last_end {
            in_span.push(*ann);
            continue;
        }
        match policy {
            OutOfRangePolicy::Fail => {
                return Err(WindowError::OutOfRange {
                    position: ann.end,
                    last_end,
                });
            }
            OutOfRangePolicy::Drop => {
                clipped += 1;
                if ann.start <= last_end {
                    in_span.push(Annotation::new(ann.start, last_end));
                }
            }
        }
    }

    if clipped > 0 {
        warn!(
            "Clipped {} annotations reaching past the last window end ({})",
            clipped, last_end
        );
    }

    let merged = reduce(&in_span);
    let mut genic = vec![0u32; table.len()];
    let mut ann_idx = 0usize;

    for (row, window) in table.iter().enumerate() {
        // skip intervals that end before this window starts
        while ann_idx < merged.len() && merged[ann_idx].end < window.start {
            ann_idx += 1;
        }

        let mut j = ann_idx;
        while j < merged.len() && merged[j].start <= window.end {
            genic[row] += window.overlap_len(merged[j].start, merged[j].end);
            j += 1;
        }
    }

    debug!(
        "Windowized {} annotations ({} after merging) into {} windows",
        annotations.len(),
        merged.len(),
        table.len()
    );

    Ok(AggregationResult::new(
        table,
        vec![CountColumn {
            name: GENIC_COLUMN.to_string(),
            values: genic,
        }],
    ))
}
