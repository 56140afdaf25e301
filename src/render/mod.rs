//! Host orchestration: samples in, waveform image out.
//!
//! The renderer owns the binned resolutions and a kernel backend. Each call picks
//! a bin size for the requested range, builds the offset table, clears a buffer
//! to the background color and launches the kernel once.

pub mod config;

use std::path::Path;

use crate::bins::{BinError, MultiResolution, TimeRange};
use crate::gpu::{GpuContext, GpuError};
use crate::raster::{CpuRasterizer, DynamicRasterizer, FrameParams, RasterError, Rasterize};

pub use config::{BackendKind, RenderConfig, VerticalScale};

/// Errors that can occur while rendering a waveform.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Binning error: {0}")]
    Bins(#[from] BinError),
    #[error("Raster error: {0}")]
    Raster(#[from] RasterError),
    #[error("GPU error: {0}")]
    Gpu(#[from] GpuError),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
    #[error("Invalid amplitude window: [{min}, {max}]")]
    InvalidAmplitudeWindow { min: f32, max: f32 },
    #[error("Pixel buffer does not fit a {width}x{height} image")]
    ImageBuffer { width: u32, height: u32 },
}

/// Renders waveform images of one mono signal.
pub struct WaveformRenderer {
    config: RenderConfig,
    scale: VerticalScale,
    resolutions: MultiResolution,
    backend: DynamicRasterizer,
    /// Takes over frames the GPU cannot hold when the backend is `Auto`.
    fallback: Option<CpuRasterizer>,
}

impl WaveformRenderer {
    /// Bin `samples` and open the backend chosen by `config.backend`.
    pub fn new(samples: &[f32], sample_rate: u32, config: RenderConfig) -> Result<Self, RenderError> {
        let backend = match config.backend {
            BackendKind::Cpu => DynamicRasterizer::cpu(),
            BackendKind::Gpu => DynamicRasterizer::gpu(&GpuContext::new_blocking()?),
            BackendKind::Auto => DynamicRasterizer::auto(),
        };
        Self::with_backend(samples, sample_rate, config, backend)
    }

    /// Like [`WaveformRenderer::new`] with an already constructed backend.
    pub fn with_backend(
        samples: &[f32],
        sample_rate: u32,
        config: RenderConfig,
        backend: DynamicRasterizer,
    ) -> Result<Self, RenderError> {
        if config.width == 0 || config.height == 0 {
            return Err(RasterError::ZeroDimension {
                width: config.width,
                height: config.height,
            }
            .into());
        }
        let scale = config.vertical_scale()?;
        let resolutions = MultiResolution::new(samples, sample_rate, &config.bin_sizes)?;

        log::info!(
            "Waveform renderer: {}x{}, bin sizes {:?}, backend {}",
            config.width,
            config.height,
            resolutions.bin_sizes(),
            backend.backend_name()
        );

        let fallback = (config.backend == BackendKind::Auto && backend.is_gpu())
            .then(CpuRasterizer::new);

        Ok(Self {
            config,
            scale,
            resolutions,
            backend,
            fallback,
        })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn resolutions(&self) -> &MultiResolution {
        &self.resolutions
    }

    pub fn is_gpu(&self) -> bool {
        self.backend.is_gpu()
    }

    /// Kernel parameters for every frame of this renderer.
    pub fn frame_params(&self) -> FrameParams {
        FrameParams {
            width: self.config.width,
            height: self.config.height,
            scale: self.scale.scale,
            global_min: self.scale.global_min,
        }
    }

    /// Render `range` to a row-major RGBA buffer.
    pub fn render_vec(&mut self, range: TimeRange) -> Result<Vec<u8>, RenderError> {
        let params = self.frame_params();
        let samples = range.to_samples(self.resolutions.sample_rate())?;
        let samples_per_pixel = samples.len() as f64 / params.width as f64;

        let extrema = self.resolutions.select(samples_per_pixel);
        let bins = extrema.frame_bins(range, params.width)?;
        log::debug!(
            "Frame {:?}: {:.1} samples/px, bin size {}, {} bins, {} empty columns",
            samples,
            samples_per_pixel,
            extrema.bin_size(),
            bins.bins.len(),
            bins.empty_columns()
        );

        let frame = bins.frame(params)?;
        let mut pixels = self
            .config
            .background
            .repeat(params.width as usize * params.height as usize);
        match (self.backend.rasterize(&frame, &mut pixels), &self.fallback) {
            (Ok(()), _) => {}
            (Err(err @ RasterError::GpuLimit(_)), Some(cpu)) => {
                log::warn!("{}, rasterizing this frame on CPU", err);
                cpu.rasterize(&frame, &mut pixels)?;
            }
            (Err(err), _) => return Err(err.into()),
        }
        Ok(pixels)
    }

    /// Render `range` to an image.
    pub fn render_image(&mut self, range: TimeRange) -> Result<image::RgbaImage, RenderError> {
        let (width, height) = (self.config.width, self.config.height);
        let pixels = self.render_vec(range)?;
        image::RgbaImage::from_raw(width, height, pixels)
            .ok_or(RenderError::ImageBuffer { width, height })
    }

    /// Render `range` and save it as a PNG file.
    pub fn save_png<P: AsRef<Path>>(&mut self, range: TimeRange, path: P) -> Result<(), RenderError> {
        let image = self.render_image(range)?;
        image.save_with_format(path.as_ref(), image::ImageFormat::Png)?;
        log::info!("Saved waveform to {}", path.as_ref().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::BAR_COLOR;

    fn cpu_config() -> RenderConfig {
        RenderConfig {
            width: 16,
            height: 8,
            bin_sizes: vec![1, 4],
            backend: BackendKind::Cpu,
            ..Default::default()
        }
    }

    #[test]
    fn test_renderer_rejects_zero_width() {
        let config = RenderConfig {
            width: 0,
            ..cpu_config()
        };
        let result = WaveformRenderer::new(&[0.0; 64], 64, config);
        assert!(matches!(
            result,
            Err(RenderError::Raster(RasterError::ZeroDimension { .. }))
        ));
    }

    #[test]
    fn test_renderer_rejects_bad_window() {
        let config = RenderConfig {
            amp_min: 1.0,
            amp_max: -1.0,
            ..cpu_config()
        };
        let result = WaveformRenderer::new(&[0.0; 64], 64, config);
        assert!(matches!(
            result,
            Err(RenderError::InvalidAmplitudeWindow { .. })
        ));
    }

    #[test]
    fn test_full_scale_square_fills_image() {
        let samples: Vec<f32> = (0..64).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();
        let mut renderer = WaveformRenderer::new(&samples, 64, cpu_config()).unwrap();
        assert!(!renderer.is_gpu());

        let pixels = renderer.render_vec(TimeRange::Samples(0, 64)).unwrap();
        assert_eq!(pixels.len(), 16 * 8 * 4);
        assert!(pixels.chunks(4).all(|p| p == BAR_COLOR));
    }

    #[test]
    fn test_silence_leaves_background() {
        let config = RenderConfig {
            background: [255, 255, 255, 255],
            ..cpu_config()
        };
        let mut renderer = WaveformRenderer::new(&[0.0; 64], 64, config).unwrap();
        let pixels = renderer.render_vec(TimeRange::Seconds(0.0, 1.0)).unwrap();
        assert!(pixels.chunks(4).all(|p| p == [255, 255, 255, 255]));
    }
}
