//! Render passes.  Every pass loads the attachments cleared at the start of
//! the frame and records its own `wgpu::RenderPass`.

pub mod ui_pass;
pub mod world_pass;

pub use ui_pass::UiPass;
pub use world_pass::WorldPass;

use vista_core::FramePacket;

use crate::geometry::GpuMesh;
use crate::resources::ObjectBuffer;

/// Read-only GPU state a pass draws with.
pub struct PassFrame<'a> {
    pub packet: &'a FramePacket,
    pub frame_bind_group: &'a wgpu::BindGroup,
    pub objects: &'a ObjectBuffer,
    pub meshes: &'a [GpuMesh],
    pub ui_meshes: &'a [GpuMesh],
}

impl PassFrame<'_> {
    /// Object-buffer slot of the first world draw; UI draws come first.
    pub fn world_slot_base(&self) -> usize {
        self.packet.ui.len()
    }
}

pub trait RenderPass {
    fn name(&self) -> &str;

    fn execute(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        color_view: &wgpu::TextureView,
        depth_view: &wgpu::TextureView,
        frame: &PassFrame<'_>,
    );
}

/// Opens a render pass that keeps what earlier passes drew.
pub(crate) fn begin_loaded<'e>(
    encoder: &'e mut wgpu::CommandEncoder,
    label: &str,
    color_view: &wgpu::TextureView,
    depth_view: &wgpu::TextureView,
) -> wgpu::RenderPass<'e> {
    encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some(label),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: color_view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Load,
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
            view: depth_view,
            depth_ops: Some(wgpu::Operations {
                load: wgpu::LoadOp::Load,
                store: wgpu::StoreOp::Store,
            }),
            stencil_ops: None,
        }),
        occlusion_query_set: None,
        timestamp_writes: None,
    })
}
