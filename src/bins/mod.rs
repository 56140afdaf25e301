//! Host-side producers of kernel inputs.
//!
//! This module provides:
//! - Per-bin min/max extrema computed from PCM samples
//! - Time ranges and their conversion to sample and bin ranges
//! - The per-column bin-offset table builder
//! - A multi-resolution set that picks a bin size per frame

pub mod extrema;
pub mod multi;
pub mod offsets;

pub use extrema::BinnedExtrema;
pub use multi::MultiResolution;
pub use offsets::{build_offsets, FrameBins, TimeRange};

/// Errors that can occur while binning samples or building offset tables.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BinError {
    #[error("Invalid bin size {bin_size} for {samples} samples")]
    InvalidBinSize { bin_size: usize, samples: usize },
    #[error("No usable bin sizes")]
    NoBinSizes,
    #[error("Time range begins after it ends: {begin} > {end}")]
    InvalidTimeRange { begin: usize, end: usize },
    #[error("Range starts at bin {first}, but only {available} bins exist")]
    RangeOutOfBounds { first: usize, available: usize },
    #[error("Too many bins for a 32-bit offset table: {0}")]
    TooManyBins(usize),
}
