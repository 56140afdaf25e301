//! GPU launch of the column kernel using a wgpu compute shader.
//!
//! The host buffer is uploaded as-is so pixels outside every span keep their
//! background, one invocation runs per column, and the result is read back into
//! the same host buffer.

use std::sync::Arc;
use wgpu::{BindGroup, Device, Queue};

use super::buffers::RasterBuffers;
use super::context::{GpuContext, GpuError};
use super::params::RasterParams;
use super::pipeline::WaveformPipeline;
use crate::raster::Frame;

/// GPU launcher for the column kernel.
pub struct GpuRasterizer {
    device: Arc<Device>,
    queue: Arc<Queue>,
    pipeline: WaveformPipeline,
    buffers: RasterBuffers,
    bind_group: BindGroup,
}

impl GpuRasterizer {
    /// Compile the kernel and allocate minimal buffers on `ctx`.
    pub fn new(ctx: &GpuContext) -> Self {
        Self::with_device(ctx.device.clone(), ctx.queue.clone())
    }

    pub fn with_device(device: Arc<Device>, queue: Arc<Queue>) -> Self {
        let pipeline = WaveformPipeline::new(&device);
        let buffers = RasterBuffers::new(&device);
        let bind_group = pipeline.create_bind_group(&device, &buffers);
        Self {
            device,
            queue,
            pipeline,
            buffers,
            bind_group,
        }
    }

    /// Paint all columns of `frame` into `res` on the GPU.
    pub fn rasterize(&mut self, frame: &Frame<'_>, res: &mut [u8]) -> Result<(), GpuError> {
        frame.check_output(res)?;

        let pixel_bytes = res.len() as u64;
        let bin_bytes = std::mem::size_of_val(frame.mins) as u64;
        let offset_bytes = std::mem::size_of_val(frame.offsets) as u64;
        self.check_limits(frame, pixel_bytes.max(bin_bytes).max(offset_bytes))?;

        if self
            .buffers
            .reserve(&self.device, offset_bytes, bin_bytes, pixel_bytes)
        {
            self.bind_group = self.pipeline.create_bind_group(&self.device, &self.buffers);
        }

        self.upload(frame, res);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("waveform_encoder"),
            });
        {
            let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("waveform_pass"),
                timestamp_writes: None,
            });
            pass.set_pipeline(&self.pipeline.pipeline);
            pass.set_bind_group(0, &self.bind_group, &[]);
            pass.dispatch_workgroups(WaveformPipeline::workgroups(frame.params.width), 1, 1);
        }
        encoder.copy_buffer_to_buffer(
            self.buffers.pixels.buffer(),
            0,
            self.buffers.staging.buffer(),
            0,
            pixel_bytes,
        );
        self.queue.submit(Some(encoder.finish()));

        self.read_back(res)
    }

    /// Get info about the device limits in use.
    pub fn limits(&self) -> wgpu::Limits {
        self.device.limits()
    }

    // --- Private helpers ---

    fn check_limits(&self, frame: &Frame<'_>, largest: u64) -> Result<(), GpuError> {
        let limits = self.device.limits();
        let limit = u64::from(limits.max_storage_buffer_binding_size);
        if largest > limit {
            return Err(GpuError::BufferTooLarge {
                size: largest,
                limit,
            });
        }

        let workgroups = WaveformPipeline::workgroups(frame.params.width);
        if workgroups > limits.max_compute_workgroups_per_dimension {
            return Err(GpuError::TooManyWorkgroups {
                workgroups,
                max: limits.max_compute_workgroups_per_dimension,
            });
        }
        Ok(())
    }

    fn upload(&self, frame: &Frame<'_>, res: &[u8]) {
        let params = RasterParams::new(&frame.params);
        self.queue
            .write_buffer(&self.buffers.params, 0, bytemuck::bytes_of(&params));
        self.queue.write_buffer(
            self.buffers.offsets.buffer(),
            0,
            bytemuck::cast_slice(frame.offsets),
        );
        if !frame.mins.is_empty() {
            self.queue
                .write_buffer(self.buffers.mins.buffer(), 0, bytemuck::cast_slice(frame.mins));
            self.queue
                .write_buffer(self.buffers.maxs.buffer(), 0, bytemuck::cast_slice(frame.maxs));
        }
        self.queue.write_buffer(self.buffers.pixels.buffer(), 0, res);
    }

    fn read_back(&self, res: &mut [u8]) -> Result<(), GpuError> {
        let staging = self.buffers.staging.buffer();
        let slice = staging.slice(..res.len() as u64);

        let (tx, rx) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |r| {
            let _ = tx.send(r);
        });
        self.device
            .poll(wgpu::PollType::wait_indefinitely())
            .map_err(|e| GpuError::BufferMapFailed(format!("{:?}", e)))?;

        rx.recv()
            .map_err(|e| GpuError::BufferMapFailed(e.to_string()))?
            .map_err(|e| GpuError::BufferMapFailed(format!("{:?}", e)))?;

        {
            let data = slice.get_mapped_range();
            res.copy_from_slice(&data);
        }
        staging.unmap();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::{rasterize_serial, FrameParams, RasterError};

    fn create_test_context() -> Option<GpuContext> {
        GpuContext::new_blocking().ok()
    }

    #[test]
    fn test_single_column() {
        if let Some(ctx) = create_test_context() {
            let mut rasterizer = GpuRasterizer::new(&ctx);
            let params = FrameParams {
                width: 1,
                height: 4,
                scale: 1.0,
                global_min: 0.0,
            };
            let offsets = [0, 1];
            let frame = Frame::new(params, &offsets, &[-1.0], &[1.0]).unwrap();

            let mut expected = vec![9u8; params.buffer_len()];
            rasterize_serial(&frame, &mut expected).unwrap();
            let mut actual = vec![9u8; params.buffer_len()];
            rasterizer.rasterize(&frame, &mut actual).unwrap();

            assert_eq!(actual, expected);
        }
    }

    #[test]
    fn test_rejects_wrong_output_length() {
        if let Some(ctx) = create_test_context() {
            let mut rasterizer = GpuRasterizer::new(&ctx);
            let params = FrameParams {
                width: 1,
                height: 4,
                scale: 1.0,
                global_min: 0.0,
            };
            let offsets = [0, 1];
            let frame = Frame::new(params, &offsets, &[0.0], &[0.0]).unwrap();
            let mut res = vec![0u8; 4];
            assert!(matches!(
                rasterizer.rasterize(&frame, &mut res),
                Err(GpuError::Contract(RasterError::OutputLength { .. }))
            ));
        }
    }
}
