//! Bind group layout builders for GPU compute pipelines.

use wgpu::{BindGroupLayout, BindGroupLayoutEntry, Device, ShaderStages};

/// Builder for creating bind group layouts with common patterns.
pub struct BindGroupLayoutBuilder {
    label: Option<&'static str>,
    entries: Vec<BindGroupLayoutEntry>,
}

impl BindGroupLayoutBuilder {
    /// Create a new bind group layout builder.
    pub fn new(label: &'static str) -> Self {
        Self {
            label: Some(label),
            entries: Vec::new(),
        }
    }

    /// Add a uniform buffer entry.
    pub fn uniform(mut self, binding: u32, visibility: ShaderStages) -> Self {
        self.entries.push(BindGroupLayoutEntry {
            binding,
            visibility,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        });
        self
    }

    /// Add a storage buffer entry.
    pub fn storage(mut self, binding: u32, visibility: ShaderStages, read_only: bool) -> Self {
        self.entries.push(BindGroupLayoutEntry {
            binding,
            visibility,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Storage { read_only },
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        });
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build the bind group layout.
    pub fn build(self, device: &Device) -> BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: self.label,
            entries: &self.entries,
        })
    }
}

/// Builder for the waveform kernel layout (params, offsets, mins, maxs, pixels).
pub fn waveform_layout_builder() -> BindGroupLayoutBuilder {
    BindGroupLayoutBuilder::new("waveform_bind_group_layout")
        .uniform(0, ShaderStages::COMPUTE)
        .storage(1, ShaderStages::COMPUTE, true)
        .storage(2, ShaderStages::COMPUTE, true)
        .storage(3, ShaderStages::COMPUTE, true)
        .storage(4, ShaderStages::COMPUTE, false)
}

/// Create the waveform kernel bind group layout.
pub fn create_waveform_layout(device: &Device) -> BindGroupLayout {
    waveform_layout_builder().build(device)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpu::GpuContext;

    #[test]
    fn test_waveform_layout_has_five_bindings() {
        let builder = waveform_layout_builder();
        assert_eq!(builder.len(), 5);
        assert!(!builder.is_empty());
    }

    #[tokio::test]
    async fn test_waveform_layout_creation() {
        let ctx = match GpuContext::new().await {
            Ok(ctx) => ctx,
            Err(_) => return, // Skip if no GPU
        };

        let _layout = create_waveform_layout(&ctx.device);
    }
}
