//! Waveform compute pipeline.

use wgpu::{BindGroup, BindGroupLayout, ComputePipeline, Device};

use super::buffers::RasterBuffers;
use super::layouts::create_waveform_layout;

/// Threads per workgroup; must match `@workgroup_size` in the shader.
pub const WORKGROUP_SIZE: u32 = 64;

const ENTRY_POINT: &str = "render_waveform";

/// Compiled kernel and its bind group layout.
pub struct WaveformPipeline {
    pub pipeline: ComputePipeline,
    pub bind_group_layout: BindGroupLayout,
}

impl WaveformPipeline {
    /// Compile the waveform kernel.
    pub fn new(device: &Device) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("waveform_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/waveform.wgsl").into()),
        });

        let bind_group_layout = create_waveform_layout(device);

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("waveform_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("waveform_pipeline"),
            layout: Some(&pipeline_layout),
            module: &shader,
            entry_point: Some(ENTRY_POINT),
            compilation_options: Default::default(),
            cache: None,
        });

        Self {
            pipeline,
            bind_group_layout,
        }
    }

    /// Bind the current buffers. Must be rebuilt whenever a buffer is reallocated.
    pub fn create_bind_group(&self, device: &Device, buffers: &RasterBuffers) -> BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("waveform_bind_group"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffers.params.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: buffers.offsets.buffer().as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: buffers.mins.buffer().as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: buffers.maxs.buffer().as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 4,
                    resource: buffers.pixels.buffer().as_entire_binding(),
                },
            ],
        })
    }

    /// Workgroups needed to cover `columns` invocations.
    pub fn workgroups(columns: u32) -> u32 {
        columns.div_ceil(WORKGROUP_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workgroups_cover_all_columns() {
        assert_eq!(WaveformPipeline::workgroups(1), 1);
        assert_eq!(WaveformPipeline::workgroups(64), 1);
        assert_eq!(WaveformPipeline::workgroups(65), 2);
        assert_eq!(WaveformPipeline::workgroups(1920), 30);
    }
}
