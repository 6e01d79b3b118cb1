use std::sync::Arc;

use crate::uniforms::{FrameUniform, ObjectUniform};

/// Bind-group layouts shared by the world and UI pipelines.
#[derive(Clone)]
pub struct PipelineLayouts {
    /// group(0) — camera matrices, eye position and point lights.
    pub frame: Arc<wgpu::BindGroupLayout>,
    /// group(1) — per-draw model/normal matrices and material, addressed
    /// with a dynamic offset into one buffer.
    pub object: Arc<wgpu::BindGroupLayout>,
}

impl PipelineLayouts {
    pub fn new(device: &wgpu::Device) -> Self {
        let uniform_entry = |dynamic: bool, size: usize| wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: dynamic,
                min_binding_size: wgpu::BufferSize::new(size as u64),
            },
            count: None,
        };

        let frame = Arc::new(device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Layout: Frame"),
            entries: &[uniform_entry(false, std::mem::size_of::<FrameUniform>())],
        }));
        let object = Arc::new(device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Layout: Object (dynamic)"),
            entries: &[uniform_entry(true, std::mem::size_of::<ObjectUniform>())],
        }));

        Self { frame, object }
    }

    pub fn pipeline_layout(&self, device: &wgpu::Device, label: &str) -> wgpu::PipelineLayout {
        device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(label),
            bind_group_layouts: &[&self.frame, &self.object],
            push_constant_ranges: &[],
        })
    }
}
