//! Windowize per-position genomic data into fixed-size windows.
//!
//! Three independent aggregations run over a shared [WindowTable]:
//!
//! - nucleotide composition of a sequence (`A`, `C`, `G`, `T`, `N`, `other`)
//! - variant density (`variants`)
//! - number of annotated positions (`genic`)
//!
//! Each returns an [AggregationResult]; results over the same table can be
//! combined with [AggregationResult::join].
//!
//! # Example
//!
//! ```
//! use varwin_core::models::WindowTable;
//! use varwin_windowize::{aggregate_sequence, aggregate_variants};
//!
//! let table = WindowTable::build(5, 10).unwrap();
//!
//! let composition = aggregate_sequence(&table, b"ACGTNACGTN").unwrap();
//! let density = aggregate_variants(&table, &[1, 3, 5, 6, 9, 11]).unwrap();
//!
//! assert_eq!(density.column("variants"), Some(&[3, 2, 1][..]));
//! let combined = composition.join(density).unwrap();
//! assert_eq!(combined.columns().len(), 7);
//! ```

pub mod annotations;
pub mod config;
pub mod errors;
pub mod result;
pub mod sequence;
pub mod variants;

// re-exports
pub use annotations::{aggregate_annotations, aggregate_annotations_with_policy};
pub use config::{OutOfRangePolicy, VariantBinning, WindowizeConfig};
pub use result::{AggregationResult, CountColumn, ResultRow};
pub use sequence::{aggregate_sequence, aggregate_sequence_with_policy};
pub use variants::{aggregate_variants, aggregate_variants_with};
pub use varwin_core::models::WindowTable;
