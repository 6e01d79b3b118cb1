//! The two render pipelines: lit world geometry and flat clip-space UI.
//!
//! Both share the vertex layout, the bind-group layouts and the depth
//! state (`LessEqual`, depth writes on) so UI drawn first occludes the
//! world behind it.  Back-face culling is off; scene files do not promise a
//! consistent winding.

use std::sync::Arc;

use crate::geometry::Vertex;
use crate::pipeline::PipelineLayouts;

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

#[derive(Clone)]
pub struct SurfacePipeline {
    pub inner: Arc<wgpu::RenderPipeline>,
}

impl SurfacePipeline {
    pub fn world(device: &wgpu::Device, format: wgpu::TextureFormat, layouts: &PipelineLayouts) -> Self {
        let shader = device.create_shader_module(wgpu::include_wgsl!("../shaders/world.wgsl"));
        Self::build(device, format, layouts, &shader, "World")
    }

    pub fn ui(device: &wgpu::Device, format: wgpu::TextureFormat, layouts: &PipelineLayouts) -> Self {
        let shader = device.create_shader_module(wgpu::include_wgsl!("../shaders/ui.wgsl"));
        Self::build(device, format, layouts, &shader, "UI")
    }

    fn build(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        layouts: &PipelineLayouts,
        shader: &wgpu::ShaderModule,
        name: &str,
    ) -> Self {
        let layout = layouts.pipeline_layout(device, &format!("{name} Pipeline Layout"));
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(&format!("{name} Render Pipeline")),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::LessEqual,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Self {
            inner: Arc::new(pipeline),
        }
    }
}
