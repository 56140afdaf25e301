//! Renderer configuration and the amplitude-to-pixel scale.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::RenderError;

/// Which kernel launcher a renderer uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// GPU if an adapter is available, CPU otherwise.
    #[default]
    Auto,
    Cpu,
    Gpu,
}

/// Renderer configuration, loadable from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    /// Lowest amplitude shown, at the bottom edge.
    pub amp_min: f32,
    /// Highest amplitude shown, at the top edge.
    pub amp_max: f32,
    /// Bin sizes to precompute, in samples.
    pub bin_sizes: Vec<usize>,
    /// RGBA fill for pixels outside every span.
    pub background: [u8; 4],
    pub backend: BackendKind,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 100,
            amp_min: -1.0,
            amp_max: 1.0,
            bin_sizes: vec![10, 100, 1000],
            background: [0, 0, 0, 0],
            backend: BackendKind::Auto,
        }
    }
}

impl RenderConfig {
    /// Parse a config from JSON; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, RenderError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON config file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, RenderError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Vertical scale fitting `[amp_min, amp_max]` into `height` rows.
    pub fn vertical_scale(&self) -> Result<VerticalScale, RenderError> {
        VerticalScale::fit(self.amp_min, self.amp_max, self.height)
    }
}

/// The kernel's `scale` and `global_min` for one amplitude window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalScale {
    pub scale: f32,
    pub global_min: f32,
}

impl VerticalScale {
    /// Fit `[amp_min, amp_max]` to `height` rows with the window's midpoint on
    /// the center row.
    pub fn fit(amp_min: f32, amp_max: f32, height: u32) -> Result<Self, RenderError> {
        if !amp_min.is_finite() || !amp_max.is_finite() || amp_max <= amp_min {
            return Err(RenderError::InvalidAmplitudeWindow {
                min: amp_min,
                max: amp_max,
            });
        }
        Ok(Self {
            scale: height as f32 / (amp_max - amp_min),
            global_min: (amp_min + amp_max) / 2.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_config_default() {
        let config = RenderConfig::default();
        assert_eq!(config.width, 800);
        assert_eq!(config.height, 100);
        assert_eq!(config.bin_sizes, vec![10, 100, 1000]);
        assert_eq!(config.backend, BackendKind::Auto);
    }

    #[test]
    fn test_render_config_partial_json() {
        let config =
            RenderConfig::from_json_str(r#"{"width": 320, "backend": "cpu"}"#).unwrap();
        assert_eq!(config.width, 320);
        assert_eq!(config.height, 100);
        assert_eq!(config.backend, BackendKind::Cpu);
    }

    #[test]
    fn test_render_config_rejects_unknown_backend() {
        let result = RenderConfig::from_json_str(r#"{"backend": "fpga"}"#);
        assert!(matches!(result, Err(RenderError::Config(_))));
    }

    #[test]
    fn test_vertical_scale_symmetric_window() {
        let vs = VerticalScale::fit(-1.0, 1.0, 100).unwrap();
        assert_eq!(vs.scale, 50.0);
        assert_eq!(vs.global_min, 0.0);
    }

    #[test]
    fn test_vertical_scale_offset_window() {
        let vs = VerticalScale::fit(0.0, 4.0, 200).unwrap();
        assert_eq!(vs.scale, 50.0);
        assert_eq!(vs.global_min, 2.0);
    }

    #[test]
    fn test_vertical_scale_invalid_windows() {
        assert!(VerticalScale::fit(1.0, 1.0, 100).is_err());
        assert!(VerticalScale::fit(1.0, -1.0, 100).is_err());
        assert!(VerticalScale::fit(f32::NAN, 1.0, 100).is_err());
        assert!(VerticalScale::fit(-1.0, f32::INFINITY, 100).is_err());
    }
}
