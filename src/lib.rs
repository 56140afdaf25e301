//! Waveform Raster Core
//!
//! Parallel rasterizer for audio waveform images built from binned min/max data.
//!
//! # Features
//!
//! - Column kernel: per pixel column, reduce a run of bin extrema and paint the
//!   resulting row span as an opaque bar
//! - CPU launch via rayon with disjoint row-band ownership of the output buffer
//! - GPU launch via a wgpu compute shader, one invocation per column
//! - Host-side binning, offset tables and multi-resolution bin selection
//! - PNG export via the `image` crate and JSON configuration via serde

pub mod bins;
pub mod gpu;
pub mod raster;
pub mod render;
pub mod signal;

// Re-export commonly used types
pub use bins::{build_offsets, BinError, BinnedExtrema, FrameBins, MultiResolution, TimeRange};
pub use gpu::{GpuContext, GpuError, GpuRasterizer};
pub use raster::{
    column_extrema, column_span, paint_column, rasterize_serial, CpuRasterizer,
    DynamicRasterizer, Frame, FrameParams, RasterError, Rasterize, Span, BAR_COLOR,
};
pub use render::{BackendKind, RenderConfig, RenderError, VerticalScale, WaveformRenderer};
