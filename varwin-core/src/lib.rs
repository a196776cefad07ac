//! Core data model for varwin.
//!
//! A linear, 1-based coordinate space is tiled into fixed-size windows
//! ([`models::WindowTable`]). Aggregators in `varwin-windowize` bin per-position
//! data into those windows.
//!
//! This crate also carries the small loaders used to feed positional data from
//! disk (variant position lists and annotation intervals).

pub mod errors;
pub mod models;
pub mod utils;
