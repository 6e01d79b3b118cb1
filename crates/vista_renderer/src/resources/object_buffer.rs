//! Dynamic uniform buffer holding one [`ObjectUniform`] per draw.
//!
//! The passes bind it once and supply a byte offset per draw call:
//!
//! ```text
//! rpass.set_bind_group(1, &objects.bind_group, &[objects.offset(slot)]);
//! ```
//!
//! Each slot is `align_up(size_of::<ObjectUniform>(), alignment)` bytes,
//! where the alignment is the device's `min_uniform_buffer_offset_alignment`.

use crate::uniforms::ObjectUniform;

const SLOT_SIZE: u64 = std::mem::size_of::<ObjectUniform>() as u64;

pub struct ObjectBuffer {
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    /// Byte stride between consecutive slots.
    pub stride: u32,
    capacity: usize,
}

impl ObjectBuffer {
    /// `layout` must be the object layout with `has_dynamic_offset: true`.
    pub fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, initial_capacity: usize) -> Self {
        let alignment = device.limits().min_uniform_buffer_offset_alignment;
        let stride = align_up(SLOT_SIZE as u32, alignment);
        let capacity = initial_capacity.max(1);
        let buffer = Self::create_buffer(device, capacity, stride);
        let bind_group = Self::create_bind_group(device, layout, &buffer);
        Self {
            buffer,
            bind_group,
            stride,
            capacity,
        }
    }

    #[inline]
    pub fn offset(&self, slot: usize) -> u32 {
        slot as u32 * self.stride
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn write(&self, queue: &wgpu::Queue, slot: usize, data: &ObjectUniform) {
        debug_assert!(slot < self.capacity, "object slot out of range");
        queue.write_buffer(&self.buffer, self.offset(slot) as u64, bytemuck::bytes_of(data));
    }

    /// Grows (doubling) until `needed` slots fit.  The bind group is
    /// recreated when the buffer is.
    pub fn ensure_capacity(&mut self, device: &wgpu::Device, layout: &wgpu::BindGroupLayout, needed: usize) {
        if needed <= self.capacity {
            return;
        }
        let mut capacity = self.capacity;
        while capacity < needed {
            capacity *= 2;
        }
        self.buffer = Self::create_buffer(device, capacity, self.stride);
        self.bind_group = Self::create_bind_group(device, layout, &self.buffer);
        self.capacity = capacity;
    }

    fn create_buffer(device: &wgpu::Device, capacity: usize, stride: u32) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Object Buffer"),
            size: capacity as u64 * stride as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn create_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        buffer: &wgpu::Buffer,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Object Buffer BindGroup"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(SLOT_SIZE),
                }),
            }],
        })
    }
}

/// Round `value` up to a multiple of `alignment` (a power of two).
#[inline]
pub(crate) fn align_up(value: u32, alignment: u32) -> u32 {
    (value + alignment - 1) & !(alignment - 1)
}
