//! Example: Render waveform images from a synthetic signal.
//!
//! Generates a ten second amplitude-modulated tone, then saves a full overview
//! and a zoomed-in view as PNG files.
//!
//! Run with:
//!     cargo run --example render_synthetic [config.json]

use waveform_raster::signal::modulated_sine;
use waveform_raster::{RenderConfig, TimeRange, WaveformRenderer};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("Waveform Raster - Synthetic Signal Example");
    println!("==========================================\n");

    let sample_rate: u32 = 44100;
    let duration_secs: usize = 10;
    let samples = modulated_sine(220.0, 0.3, sample_rate, sample_rate as usize * duration_secs);
    println!("Generated {} samples at {} Hz", samples.len(), sample_rate);

    let config = match std::env::args().nth(1) {
        Some(path) => RenderConfig::from_json_file(path)?,
        None => RenderConfig {
            width: 1200,
            height: 200,
            background: [255, 255, 255, 255],
            ..Default::default()
        },
    };
    println!("  Resolution: {}x{}", config.width, config.height);
    println!("  Bin sizes: {:?}", config.bin_sizes);

    let mut renderer = WaveformRenderer::new(&samples, sample_rate, config)?;
    println!("  Backend: {}\n", if renderer.is_gpu() { "GPU" } else { "CPU" });

    let views = [
        ("waveform_overview.png", TimeRange::Seconds(0.0, duration_secs as f64)),
        ("waveform_zoom.png", TimeRange::Seconds(1.0, 1.05)),
    ];
    for (path, range) in views {
        let start = std::time::Instant::now();
        renderer.save_png(range, path)?;
        println!("Rendered {:?} to {} in {:?}", range, path, start.elapsed());
    }

    Ok(())
}
