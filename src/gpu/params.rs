//! Uniform parameter struct for the waveform shader.
//!
//! Must match `RasterParams` in `shaders/waveform.wgsl`, including alignment.

use crate::raster::{FrameParams, BAR_COLOR};

/// Per-launch uniforms. 32 bytes, a multiple of the 16-byte uniform alignment.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct RasterParams {
    pub width: u32,
    pub height: u32,
    pub scale: f32,
    pub global_min: f32,
    /// `BAR_COLOR` packed little-endian, as one `u32` pixel.
    pub color: u32,
    pub _padding: [u32; 3],
}

impl RasterParams {
    pub fn new(params: &FrameParams) -> Self {
        Self {
            width: params.width,
            height: params.height,
            scale: params.scale,
            global_min: params.global_min,
            color: u32::from_le_bytes(BAR_COLOR),
            _padding: [0; 3],
        }
    }
}
