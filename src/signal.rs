//! Deterministic test signals.
//!
//! Used by tests, benchmarks and the demo to drive the renderer without decoding
//! audio files.

use std::f32::consts::TAU;

/// A sine tone of `len` samples.
pub fn sine(frequency: f32, sample_rate: u32, len: usize, amplitude: f32) -> Vec<f32> {
    let step = TAU * frequency / sample_rate as f32;
    (0..len)
        .map(|i| amplitude * (step * i as f32).sin())
        .collect()
}

/// A `carrier` tone whose amplitude follows a slower sine `envelope`.
///
/// Gives a waveform whose column spans grow and shrink across the image.
pub fn modulated_sine(carrier: f32, envelope: f32, sample_rate: u32, len: usize) -> Vec<f32> {
    let carrier_step = TAU * carrier / sample_rate as f32;
    let envelope_step = TAU * envelope / sample_rate as f32;
    (0..len)
        .map(|i| {
            let t = i as f32;
            (carrier_step * t).sin() * (envelope_step * t).sin()
        })
        .collect()
}

/// Uniform noise in `[-amplitude, amplitude]` from a 64-bit LCG.
pub fn noise(len: usize, amplitude: f32, seed: u64) -> Vec<f32> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            // Top 24 bits map exactly onto f32's mantissa.
            let unit = (state >> 40) as f32 / (1u64 << 24) as f32;
            amplitude * (unit * 2.0 - 1.0)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sine_peak() {
        let samples = sine(100.0, 8000, 8000, 0.5);
        assert_eq!(samples.len(), 8000);
        let max = samples.iter().copied().fold(f32::MIN, f32::max);
        assert!((max - 0.5).abs() < 0.01);
    }

    #[test]
    fn test_modulated_sine_starts_silent() {
        let samples = modulated_sine(441.0, 4.41, 44100, 44100);
        assert_eq!(samples[0], 0.0);
        assert!(samples.iter().all(|s| s.abs() <= 1.0));
    }

    #[test]
    fn test_noise_is_bounded_and_reproducible() {
        let a = noise(1000, 0.8, 7);
        let b = noise(1000, 0.8, 7);
        assert_eq!(a, b);
        assert!(a.iter().all(|s| s.abs() <= 0.8));
        assert!(a.iter().any(|&s| s > 0.0) && a.iter().any(|&s| s < 0.0));
        assert_ne!(a, noise(1000, 0.8, 8));
    }
}
