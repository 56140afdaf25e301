//! Unified launcher trait for the CPU and GPU backends.

use crate::gpu::{GpuContext, GpuError, GpuRasterizer};

use super::cpu::CpuRasterizer;
use super::frame::{Frame, RasterError};

/// Anything that can launch the column kernel over a whole frame.
pub trait Rasterize {
    /// Paint every column of `frame` into `res`.
    ///
    /// `res` must already hold the background; pixels outside the spans are kept.
    fn rasterize(&mut self, frame: &Frame<'_>, res: &mut [u8]) -> Result<(), RasterError>;

    /// Short name for logs.
    fn backend_name(&self) -> &'static str;
}

impl Rasterize for CpuRasterizer {
    fn rasterize(&mut self, frame: &Frame<'_>, res: &mut [u8]) -> Result<(), RasterError> {
        CpuRasterizer::rasterize(self, frame, res)
    }

    fn backend_name(&self) -> &'static str {
        "cpu"
    }
}

impl Rasterize for GpuRasterizer {
    fn rasterize(&mut self, frame: &Frame<'_>, res: &mut [u8]) -> Result<(), RasterError> {
        GpuRasterizer::rasterize(self, frame, res).map_err(raster_error)
    }

    fn backend_name(&self) -> &'static str {
        "gpu"
    }
}

/// Fold a GPU launch failure into the backend-neutral error.
fn raster_error(err: GpuError) -> RasterError {
    match err {
        GpuError::Contract(inner) => inner,
        GpuError::BufferTooLarge { .. } | GpuError::TooManyWorkgroups { .. } => {
            RasterError::GpuLimit(err.to_string())
        }
        other => RasterError::Gpu(other.to_string()),
    }
}

/// Runtime-selected backend.
pub enum DynamicRasterizer {
    Cpu(CpuRasterizer),
    Gpu(Box<GpuRasterizer>),
}

impl DynamicRasterizer {
    /// Create a CPU-based rasterizer.
    pub fn cpu() -> Self {
        DynamicRasterizer::Cpu(CpuRasterizer::new())
    }

    /// Create a GPU-based rasterizer on an existing context.
    pub fn gpu(ctx: &GpuContext) -> Self {
        DynamicRasterizer::Gpu(Box::new(GpuRasterizer::new(ctx)))
    }

    /// Use the GPU when a context is given, the CPU otherwise.
    pub fn gpu_with_fallback(ctx: Option<&GpuContext>) -> Self {
        match ctx {
            Some(ctx) => Self::gpu(ctx),
            None => Self::cpu(),
        }
    }

    /// Try to open a GPU context, falling back to the CPU if none is available.
    pub fn auto() -> Self {
        match GpuContext::new_blocking() {
            Ok(ctx) => {
                log::info!("Rasterizing on GPU: {}", ctx.adapter_info().name);
                Self::gpu(&ctx)
            }
            Err(e) => {
                log::warn!("GPU unavailable ({}), rasterizing on CPU", e);
                Self::cpu()
            }
        }
    }

    /// Check if this rasterizer is using the GPU.
    pub fn is_gpu(&self) -> bool {
        matches!(self, DynamicRasterizer::Gpu(_))
    }
}

impl Rasterize for DynamicRasterizer {
    fn rasterize(&mut self, frame: &Frame<'_>, res: &mut [u8]) -> Result<(), RasterError> {
        match self {
            DynamicRasterizer::Cpu(r) => Rasterize::rasterize(r, frame, res),
            DynamicRasterizer::Gpu(r) => Rasterize::rasterize(r.as_mut(), frame, res),
        }
    }

    fn backend_name(&self) -> &'static str {
        match self {
            DynamicRasterizer::Cpu(r) => r.backend_name(),
            DynamicRasterizer::Gpu(r) => r.backend_name(),
        }
    }
}
