//! Integration tests for the GPU rasterizer.
//!
//! Every test skips silently when no adapter is available.

mod common;

use common::{noise_frame, single_bin_frame};
use waveform_raster::{
    rasterize_serial, CpuRasterizer, DynamicRasterizer, Frame, FrameParams, GpuContext,
    GpuRasterizer, RenderConfig, TimeRange, WaveformRenderer,
};

async fn create_gpu_context() -> Option<GpuContext> {
    GpuContext::new().await.ok()
}

#[tokio::test]
async fn test_gpu_matches_cpu_scenario_a() {
    if let Some(ctx) = create_gpu_context().await {
        let data = single_bin_frame(
            10,
            1.0,
            0.0,
            &[(0.0, 0.0), (0.0, 5.0), (-5.0, 0.0), (-5.0, 5.0)],
        );
        let frame = data.frame();

        let mut expected = data.buffer(0);
        CpuRasterizer::new().rasterize(&frame, &mut expected).unwrap();
        let mut actual = data.buffer(0);
        GpuRasterizer::new(&ctx).rasterize(&frame, &mut actual).unwrap();

        assert_eq!(actual, expected);
    }
}

#[tokio::test]
async fn test_gpu_matches_cpu_on_noise() {
    if let Some(ctx) = create_gpu_context().await {
        let mut gpu = GpuRasterizer::new(&ctx);
        // Growing frames force the device buffers to be reallocated between runs.
        for (seed, width, height, bins) in [
            (1, 8, 8, 8),
            (2, 100, 37, 1000),
            (3, 257, 64, 5000),
            (4, 1024, 128, 44100),
            (5, 33, 9, 40),
        ] {
            let data = noise_frame(width, height, bins, height as f32 / 2.5, seed);
            let frame = data.frame();

            let mut expected = data.buffer(0x7f);
            rasterize_serial(&frame, &mut expected).unwrap();
            let mut actual = data.buffer(0x7f);
            gpu.rasterize(&frame, &mut actual).unwrap();

            assert_eq!(actual, expected, "seed {} width {}", seed, width);
        }
    }
}

#[tokio::test]
async fn test_gpu_empty_columns_keep_background() {
    if let Some(ctx) = create_gpu_context().await {
        let params = FrameParams {
            width: 6,
            height: 12,
            scale: 3.0,
            global_min: 0.0,
        };
        let offsets = [0, 0, 0, 1, 1, 2, 2];
        let mins = [-1.0, -0.5];
        let maxs = [1.0, 0.5];
        let frame = Frame::new(params, &offsets, &mins, &maxs).unwrap();

        let mut expected = vec![0x40u8; params.buffer_len()];
        rasterize_serial(&frame, &mut expected).unwrap();
        let mut actual = vec![0x40u8; params.buffer_len()];
        GpuRasterizer::new(&ctx).rasterize(&frame, &mut actual).unwrap();

        assert_eq!(actual, expected);
    }
}

#[tokio::test]
async fn test_gpu_frame_without_bins() {
    if let Some(ctx) = create_gpu_context().await {
        let params = FrameParams {
            width: 3,
            height: 4,
            scale: 1.0,
            global_min: 0.0,
        };
        let offsets = [0, 0, 0, 0];
        let frame = Frame::new(params, &offsets, &[], &[]).unwrap();

        let mut res = vec![0x22u8; params.buffer_len()];
        GpuRasterizer::new(&ctx).rasterize(&frame, &mut res).unwrap();
        assert!(res.iter().all(|&b| b == 0x22));
    }
}

#[test]
fn test_gpu_renderer_matches_cpu_renderer() {
    let ctx = match GpuContext::new_blocking() {
        Ok(ctx) => ctx,
        Err(_) => return,
    };

    let samples = waveform_raster::signal::modulated_sine(441.0, 3.0, 44100, 88200);
    let config = RenderConfig {
        width: 320,
        height: 80,
        background: [255, 255, 255, 255],
        ..Default::default()
    };

    let mut cpu =
        WaveformRenderer::with_backend(&samples, 44100, config.clone(), DynamicRasterizer::cpu())
            .unwrap();
    let mut gpu =
        WaveformRenderer::with_backend(&samples, 44100, config, DynamicRasterizer::gpu(&ctx))
            .unwrap();
    assert!(gpu.is_gpu());

    for range in [
        TimeRange::Seconds(0.0, 2.0),
        TimeRange::Seconds(0.5, 0.6),
        TimeRange::Samples(1000, 1200),
    ] {
        let expected = cpu.render_vec(range).unwrap();
        let actual = gpu.render_vec(range).unwrap();
        assert_eq!(actual, expected, "{:?}", range);
    }
}

#[test]
fn test_auto_renderer_falls_back_to_cpu_past_gpu_limits() {
    let ctx = match GpuContext::new_blocking() {
        Ok(ctx) => ctx,
        Err(_) => return,
    };

    // One column more than the default 65535 workgroups of 64 can cover.
    let width = 65536 * 64;
    let samples = waveform_raster::signal::sine(50.0, 8000, 10_000, 0.9);
    let config = RenderConfig {
        width,
        height: 1,
        ..Default::default()
    };
    let range = TimeRange::Samples(0, 10_000);

    let mut gpu =
        WaveformRenderer::with_backend(&samples, 8000, config.clone(), DynamicRasterizer::gpu(&ctx))
            .unwrap();
    let actual = gpu.render_vec(range).unwrap();

    let mut cpu =
        WaveformRenderer::with_backend(&samples, 8000, config, DynamicRasterizer::cpu()).unwrap();
    assert_eq!(actual, cpu.render_vec(range).unwrap());
}
