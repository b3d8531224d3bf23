//! # Output utilities for density histograms.
//!
//! This small crate writes a finished [`DensityHistogram`](densaround_histogram::DensityHistogram)
//! as CSV. Output files are written to a temporary file next to the target
//! and only moved into place by [`OutputFile::commit`], so a run that fails
//! midway never leaves a truncated result behind. A `.gz` suffix selects
//! gzip output and `-` selects standard output.
//!
pub mod consts;
pub mod csv;
pub mod error;
pub mod output;

// re-expose core functions
pub use consts::*;
pub use csv::*;
pub use error::*;
pub use output::*;
