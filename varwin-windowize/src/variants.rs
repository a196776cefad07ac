//! Per-window variant density.

use log::{debug, warn};
use varwin_core::errors::WindowError;
use varwin_core::models::WindowTable;

use crate::config::{OutOfRangePolicy, VariantBinning};
use crate::result::{AggregationResult, CountColumn};

pub const VARIANTS_COLUMN: &str = "variants";

///
/// Count variant positions per window with the single-step cursor, failing
/// on positions past the end of the table.
///
/// Positions must be sorted ascending. See [VariantBinning::SingleStep].
///
pub fn aggregate_variants(
    table: &WindowTable,
    positions: &[u32],
) -> Result<AggregationResult, WindowError> {
    aggregate_variants_with(
        table,
        positions,
        VariantBinning::SingleStep,
        OutOfRangePolicy::Fail,
    )
}

///
/// Count variant positions per window.
///
/// With [VariantBinning::SingleStep] a position past the current window's end
/// moves the cursor forward by exactly one window and is counted there, so a
/// position that skips several windows is binned too early. With
/// [VariantBinning::Direct] every position is placed in the window that
/// contains it, regardless of input order.
///
/// Position `0` is rejected before any counting. Positions past the table's
/// covered span are handled according to `policy`.
///
pub fn aggregate_variants_with(
    table: &WindowTable,
    positions: &[u32],
    binning: VariantBinning,
    policy: OutOfRangePolicy,
) -> Result<AggregationResult, WindowError> {
    if let Some(i) = positions.iter().position(|&p| p == 0) {
        return Err(WindowError::InvalidArgument(format!(
            "variant #{} has position 0; positions are 1-based",
            i + 1
        )));
    }

    let last_end = table.last_end();
    let mut var_counts = vec![0u32; table.len()];
    let mut dropped = 0usize;
    let mut window_num = 0usize;

    for &position in positions {
        if position > last_end {
            match policy {
                OutOfRangePolicy::Fail => {
                    return Err(WindowError::OutOfRange { position, last_end });
                }
                OutOfRangePolicy::Drop => {
                    dropped += 1;
                    continue;
                }
            }
        }

        match binning {
            VariantBinning::SingleStep => {
                // one step per position, and the position that triggers the
                // step is counted in the new window rather than discarded.
                // position <= last_end, so the cursor never leaves the table
                if position > table[window_num].end {
                    window_num += 1;
                }
                var_counts[window_num] += 1;
            }
            VariantBinning::Direct => {
                // locate only fails past last_end, which was handled above
                if let Some(row) = table.locate(position) {
                    var_counts[row] += 1;
                }
            }
        }
    }

    if dropped > 0 {
        warn!(
            "Dropped {} variant positions past the last window end ({})",
            dropped, last_end
        );
    }
    debug!(
        "Windowized {} variant positions into {} windows",
        positions.len() - dropped,
        table.len()
    );

    Ok(AggregationResult::new(
        table,
        vec![CountColumn {
            name: VARIANTS_COLUMN.to_string(),
            values: var_counts,
        }],
    ))
}
