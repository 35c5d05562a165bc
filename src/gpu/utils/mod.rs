// WebGPU Utilities
// Helper functions for common WebGPU operations
// - GPU buffer creation with the initial contents uploaded through a
//   mapped-at-creation range

use web_sys::{GpuBuffer, GpuDevice, gpu_buffer_usage};

use crate::error::Result;

/// Buffers mapped at creation must have a size that is a multiple of 4.
pub const MAPPED_SIZE_ALIGNMENT: usize = 4;

pub fn aligned_size(len: usize) -> usize {
    len.div_ceil(MAPPED_SIZE_ALIGNMENT) * MAPPED_SIZE_ALIGNMENT
}

/// Creates a buffer holding `data`. `COPY_DST` is always added to `usage` so
/// the contents can be rewritten later through the queue.
pub fn create_gpu_buffer(device: &GpuDevice, data: &[u8], usage: u32) -> Result<GpuBuffer> {
    let descriptor = web_sys::GpuBufferDescriptor::new(
        aligned_size(data.len()) as f64,
        usage | gpu_buffer_usage::COPY_DST,
    );
    descriptor.set_mapped_at_creation(true);
    let buffer = device.create_buffer(&descriptor)?;

    let range = buffer.get_mapped_range()?;
    let mapped = js_sys::Uint8Array::new(&range);
    mapped.subarray(0, data.len() as u32).copy_from(data);
    buffer.unmap();

    Ok(buffer)
}
