//! `vista_renderer` — wgpu renderer for Vista scenes.
//!
//! | Module      | Responsibility                                        |
//! |-------------|-------------------------------------------------------|
//! | `context`   | `EngineContext`: instance, adapter, device, queue     |
//! | `resources` | Buffer helpers, dynamic per-draw object buffer        |
//! | `uniforms`  | `#[repr(C)]` frame / object uniforms                  |
//! | `geometry`  | `Vertex`, `GpuMesh`                                   |
//! | `pipeline`  | Bind-group layouts, world and UI pipelines            |
//! | `passes`    | `UiPass`, `WorldPass`                                 |
//!
//! The renderer never looks at the scene while drawing: it consumes the
//! [`FramePacket`] built by `vista_core` and the meshes uploaded by
//! [`Renderer::upload_scene`].

pub mod context;
pub mod depth;
pub mod geometry;
pub mod passes;
pub mod pipeline;
pub mod resources;
pub mod uniforms;

pub use context::{ContextError, EngineContext};
pub use geometry::{GpuMesh, Vertex};
pub use uniforms::MAX_LIGHTS;

use log::debug;
use vista_core::{Color, FramePacket, Scene};

use depth::DepthTarget;
use passes::{PassFrame, RenderPass, UiPass, WorldPass};
use pipeline::{PipelineLayouts, SurfacePipeline};
use resources::{buffer, ObjectBuffer};
use uniforms::{FrameUniform, ObjectUniform};

/// Draws frame packets into a colour view.
pub struct Renderer {
    pub context: EngineContext,
    layouts: PipelineLayouts,

    frame_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    objects: ObjectBuffer,

    meshes: Vec<GpuMesh>,
    ui_meshes: Vec<GpuMesh>,

    depth: DepthTarget,
    /// Executed in order every frame: UI first, then the world.
    passes: Vec<Box<dyn RenderPass>>,
    width: u32,
    height: u32,
}

impl Renderer {
    pub fn new(context: EngineContext, width: u32, height: u32, format: wgpu::TextureFormat) -> Self {
        let device = &context.device;
        let layouts = PipelineLayouts::new(device);

        let frame_buffer = buffer::create_uniform(device, "Frame Uniform", &FrameUniform::default());
        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Frame BindGroup"),
            layout: &layouts.frame,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            }],
        });
        let objects = ObjectBuffer::new(device, &layouts.object, 64);

        let passes: Vec<Box<dyn RenderPass>> = vec![
            Box::new(UiPass::new(SurfacePipeline::ui(device, format, &layouts))),
            Box::new(WorldPass::new(SurfacePipeline::world(device, format, &layouts))),
        ];

        let depth = DepthTarget::new(device, width, height);

        Self {
            context,
            layouts,
            frame_buffer,
            frame_bind_group,
            objects,
            meshes: Vec::new(),
            ui_meshes: Vec::new(),
            depth,
            passes,
            width,
            height,
        }
    }

    /// Recreates the depth target for a new surface size.
    pub fn resize(&mut self, width: u32, height: u32) {
        if (width, height) == (self.width, self.height) || width == 0 || height == 0 {
            return;
        }
        self.depth.resize(&self.context.device, width, height);
        self.width = width;
        self.height = height;
    }

    /// Uploads every object's geometry and stores the mesh slot in its
    /// `render_handle`.  Replaces whatever was uploaded before.
    pub fn upload_scene(&mut self, scene: &mut Scene) {
        let device = &self.context.device;
        self.meshes.clear();
        self.ui_meshes.clear();

        for object in scene.objects_mut() {
            object.render_handle = Some(self.meshes.len());
            self.meshes.push(GpuMesh::upload(device, &object.name, &object.geometry));
        }
        for ui in &mut scene.ui_objects {
            ui.render_handle = Some(self.ui_meshes.len());
            self.ui_meshes.push(GpuMesh::upload(device, &ui.name, &ui.geometry));
        }
        debug!("uploaded {} meshes, {} ui meshes", self.meshes.len(), self.ui_meshes.len());
    }

    /// Writes the frame and per-draw uniforms for `packet`.
    fn prepare(&mut self, packet: &FramePacket) {
        let device = &self.context.device;
        let queue = &self.context.queue;

        buffer::update_uniform(queue, &self.frame_buffer, &FrameUniform::new(&packet.camera, &packet.lights));

        self.objects
            .ensure_capacity(device, &self.layouts.object, packet.ui.len() + packet.world.len());
        for (slot, draw) in packet.ui.iter().enumerate() {
            self.objects.write(queue, slot, &ObjectUniform::flat(draw.color));
        }
        let base = packet.ui.len();
        for (i, draw) in packet.world.iter().enumerate() {
            let data = ObjectUniform::world(draw.model, draw.normal, &draw.material);
            self.objects.write(queue, base + i, &data);
        }
    }

    /// Clears to the packet's background colour and runs every pass into
    /// `view`, then submits.
    pub fn render(&mut self, packet: &FramePacket, view: &wgpu::TextureView) {
        self.prepare(packet);

        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        clear(&mut encoder, view, &self.depth.view, packet.clear_color);

        let frame = PassFrame {
            packet,
            frame_bind_group: &self.frame_bind_group,
            objects: &self.objects,
            meshes: &self.meshes,
            ui_meshes: &self.ui_meshes,
        };
        for pass in &self.passes {
            pass.execute(&mut encoder, view, &self.depth.view, &frame);
        }

        self.context.queue.submit(std::iter::once(encoder.finish()));
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

fn clear(encoder: &mut wgpu::CommandEncoder, color: &wgpu::TextureView, depth: &wgpu::TextureView, bg: Color) {
    encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("Clear Pass"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: color,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(to_wgpu(bg)),
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
            view: depth,
            depth_ops: Some(wgpu::Operations {
                load: wgpu::LoadOp::Clear(1.0),
                store: wgpu::StoreOp::Store,
            }),
            stencil_ops: None,
        }),
        occlusion_query_set: None,
        timestamp_writes: None,
    });
}

/// Background colours are always drawn opaque.
pub fn to_wgpu(c: Color) -> wgpu::Color {
    wgpu::Color {
        r: c.r as f64,
        g: c.g as f64,
        b: c.b as f64,
        a: 1.0,
    }
}
