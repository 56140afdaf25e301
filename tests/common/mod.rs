//! Shared test fixtures for raster tests.

#![allow(dead_code)]

use waveform_raster::signal::noise;
use waveform_raster::{build_offsets, FrameParams};

/// Owned kernel inputs that a test can borrow a `Frame` from.
pub struct FrameData {
    pub params: FrameParams,
    pub offsets: Vec<u32>,
    pub mins: Vec<f32>,
    pub maxs: Vec<f32>,
}

impl FrameData {
    pub fn frame(&self) -> waveform_raster::Frame<'_> {
        waveform_raster::Frame::new(self.params, &self.offsets, &self.mins, &self.maxs)
            .expect("fixture frame should be valid")
    }

    pub fn buffer(&self, fill: u8) -> Vec<u8> {
        vec![fill; self.params.buffer_len()]
    }
}

/// One bin per column with the given `(min, max)` pairs.
pub fn single_bin_frame(height: u32, scale: f32, global_min: f32, bins: &[(f32, f32)]) -> FrameData {
    let width = bins.len() as u32;
    FrameData {
        params: FrameParams {
            width,
            height,
            scale,
            global_min,
        },
        offsets: (0..=width).collect(),
        mins: bins.iter().map(|b| b.0).collect(),
        maxs: bins.iter().map(|b| b.1).collect(),
    }
}

/// Noise-derived bins spread evenly over `width` columns.
pub fn noise_frame(width: u32, height: u32, bins: u32, scale: f32, seed: u64) -> FrameData {
    let a = noise(bins as usize, 1.0, seed);
    let b = noise(bins as usize, 1.0, seed.wrapping_add(1));
    let (mins, maxs) = a.iter().zip(&b).map(|(&x, &y)| (x.min(y), x.max(y))).unzip();
    FrameData {
        params: FrameParams {
            width,
            height,
            scale,
            global_min: 0.0,
        },
        offsets: build_offsets(bins, width),
        mins,
        maxs,
    }
}

/// Painted rows of column `x`, read back from an RGBA buffer.
pub fn painted_rows(res: &[u8], width: usize, height: usize, x: usize, background: u8) -> Vec<usize> {
    (0..height)
        .filter(|&y| {
            let idx = (x + y * width) * 4;
            res[idx..idx + 4] != [background; 4]
        })
        .collect()
}
