//! GPU buffer management for the waveform kernel.
//!
//! Buffers grow to the next power of two when a frame outgrows them and are
//! reused otherwise.

use wgpu::{Buffer, BufferUsages, Device};

/// Storage bindings must not be empty.
const MIN_BUFFER_SIZE: u64 = 16;

/// A buffer together with its allocated size.
pub struct GrowableBuffer {
    label: &'static str,
    usage: BufferUsages,
    buffer: Buffer,
    capacity: u64,
}

impl GrowableBuffer {
    pub fn new(device: &Device, label: &'static str, usage: BufferUsages) -> Self {
        let buffer = Self::allocate(device, label, usage, MIN_BUFFER_SIZE);
        Self {
            label,
            usage,
            buffer,
            capacity: MIN_BUFFER_SIZE,
        }
    }

    /// Make room for `size` bytes. Returns `true` if the buffer was reallocated.
    pub fn reserve(&mut self, device: &Device, size: u64) -> bool {
        if size <= self.capacity {
            return false;
        }
        let capacity = size.next_power_of_two().max(MIN_BUFFER_SIZE);
        log::debug!(
            "Growing {} from {} to {} bytes",
            self.label,
            self.capacity,
            capacity
        );
        self.buffer = Self::allocate(device, self.label, self.usage, capacity);
        self.capacity = capacity;
        true
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    fn allocate(device: &Device, label: &str, usage: BufferUsages, size: u64) -> Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size,
            usage,
            mapped_at_creation: false,
        })
    }
}

/// Collection of GPU buffers used by one rasterizer.
pub struct RasterBuffers {
    pub params: Buffer,
    pub offsets: GrowableBuffer,
    pub mins: GrowableBuffer,
    pub maxs: GrowableBuffer,
    pub pixels: GrowableBuffer,
    pub staging: GrowableBuffer,
}

impl RasterBuffers {
    pub fn new(device: &Device) -> Self {
        let input = BufferUsages::STORAGE | BufferUsages::COPY_DST;
        Self {
            params: device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("waveform_params"),
                size: std::mem::size_of::<super::params::RasterParams>() as u64,
                usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }),
            offsets: GrowableBuffer::new(device, "waveform_offsets", input),
            mins: GrowableBuffer::new(device, "waveform_mins", input),
            maxs: GrowableBuffer::new(device, "waveform_maxs", input),
            pixels: GrowableBuffer::new(
                device,
                "waveform_pixels",
                BufferUsages::STORAGE | BufferUsages::COPY_DST | BufferUsages::COPY_SRC,
            ),
            staging: GrowableBuffer::new(
                device,
                "waveform_staging",
                BufferUsages::MAP_READ | BufferUsages::COPY_DST,
            ),
        }
    }

    /// Make room for a frame. Returns `true` if any buffer was reallocated.
    pub fn reserve(&mut self, device: &Device, offsets: u64, bins: u64, pixels: u64) -> bool {
        let mut grown = self.offsets.reserve(device, offsets);
        grown |= self.mins.reserve(device, bins);
        grown |= self.maxs.reserve(device, bins);
        grown |= self.pixels.reserve(device, pixels);
        grown |= self.staging.reserve(device, pixels);
        grown
    }
}
