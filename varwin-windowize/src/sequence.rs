//! Per-window nucleotide composition.

use log::{debug, warn};
use varwin_core::errors::WindowError;
use varwin_core::models::WindowTable;

use crate::config::OutOfRangePolicy;
use crate::result::{AggregationResult, CountColumn};

/// Column names added by [aggregate_sequence], in output order.
pub const SEQUENCE_COLUMNS: [&str; 6] = ["A", "C", "G", "T", "N", "other"];

/// Classification of a single sequence symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Base {
    A,
    C,
    G,
    T,
    N,
    Other,
}

impl Base {
    /// Case-insensitive; anything outside `ACGTN` is [Base::Other].
    #[inline]
    pub fn from_byte(byte: u8) -> Base {
        match byte.to_ascii_uppercase() {
            b'A' => Base::A,
            b'C' => Base::C,
            b'G' => Base::G,
            b'T' => Base::T,
            b'N' => Base::N,
            _ => Base::Other,
        }
    }

    /// Position of this base's counter in [SEQUENCE_COLUMNS].
    #[inline]
    pub fn column(self) -> usize {
        match self {
            Base::A => 0,
            Base::C => 1,
            Base::G => 2,
            Base::T => 3,
            Base::N => 4,
            Base::Other => 5,
        }
    }
}

///
/// Count A, C, G, T, N and other symbols per window, failing on positions
/// past the end of the table.
///
/// The sequence must begin at position one.
///
pub fn aggregate_sequence(
    table: &WindowTable,
    sequence: &[u8],
) -> Result<AggregationResult, WindowError> {
    aggregate_sequence_with_policy(table, sequence, OutOfRangePolicy::Fail)
}

///
/// Count A, C, G, T, N and other symbols per window.
///
/// Positions are visited in order with a forward-only window cursor. A
/// sequence longer than the table's covered span either fails up front
/// ([OutOfRangePolicy::Fail]) or has its tail ignored ([OutOfRangePolicy::Drop]).
///
pub fn aggregate_sequence_with_policy(
    table: &WindowTable,
    sequence: &[u8],
    policy: OutOfRangePolicy,
) -> Result<AggregationResult, WindowError> {
    let last_end = table.last_end();
    let mut counts = vec![[0u32; 6]; table.len()];

    let n_binnable = sequence.len().min(last_end as usize);
    if n_binnable < sequence.len() {
        match policy {
            OutOfRangePolicy::Fail => {
                return Err(WindowError::OutOfRange {
                    position: last_end.saturating_add(1),
                    last_end,
                });
            }
            OutOfRangePolicy::Drop => {
                warn!(
                    "Dropping {} sequence positions past the last window end ({})",
                    sequence.len() - n_binnable,
                    last_end
                );
            }
        }
    }

    // Vectors are zero based, sequence positions are one based.
    let mut window_num = 0usize;
    for (i, &byte) in sequence[..n_binnable].iter().enumerate() {
        let position = i as u32 + 1;
        while position > table[window_num].end {
            window_num += 1;
        }
        counts[window_num][Base::from_byte(byte).column()] += 1;
    }

    debug!(
        "Windowized {} sequence positions into {} windows",
        n_binnable,
        table.len()
    );

    let columns = SEQUENCE_COLUMNS
        .iter()
        .enumerate()
        .map(|(col, name)| CountColumn {
            name: name.to_string(),
            values: counts.iter().map(|row| row[col]).collect(),
        })
        .collect();

    Ok(AggregationResult::new(table, columns))
}
