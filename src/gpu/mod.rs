//! GPU compute using wgpu.
//!
//! Runs the column kernel as a compute shader with one invocation per pixel
//! column, on Metal (macOS), Vulkan or GL.

mod buffers;
mod params;

pub mod context;
pub mod layouts;
pub mod pipeline;
pub mod rasterizer;

pub use context::{GpuContext, GpuError};
pub use params::RasterParams;
pub use pipeline::WaveformPipeline;
pub use rasterizer::GpuRasterizer;
