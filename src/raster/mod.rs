//! Column rasterization kernel and its launchers.
//!
//! This module provides:
//! - Frame inputs and contract checks (`Frame`, `FrameParams`)
//! - The per-column kernel (`column_extrema`, `column_span`, `paint_column`)
//! - A serial reference launch and a rayon-parallel CPU launch
//! - A unified `Rasterize` trait over the CPU and GPU backends

pub mod backend;
pub mod cpu;
pub mod frame;
pub mod kernel;

pub use backend::{DynamicRasterizer, Rasterize};
pub use cpu::CpuRasterizer;
pub use frame::{Frame, FrameParams, RasterError, BAR_COLOR, BYTES_PER_PIXEL};
pub use kernel::{column_extrema, column_span, paint_column, rasterize_serial, Span};
