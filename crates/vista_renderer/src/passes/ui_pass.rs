//! Clip-space overlay, drawn before the world.

use crate::passes::{begin_loaded, PassFrame, RenderPass};
use crate::pipeline::SurfacePipeline;

pub struct UiPass {
    pipeline: SurfacePipeline,
}

impl UiPass {
    pub fn new(pipeline: SurfacePipeline) -> Self {
        Self { pipeline }
    }
}

impl RenderPass for UiPass {
    fn name(&self) -> &str {
        "UI Pass"
    }

    fn execute(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        color_view: &wgpu::TextureView,
        depth_view: &wgpu::TextureView,
        frame: &PassFrame<'_>,
    ) {
        if frame.packet.ui.is_empty() {
            return;
        }
        let mut rpass = begin_loaded(encoder, self.name(), color_view, depth_view);
        rpass.set_pipeline(&self.pipeline.inner);
        rpass.set_bind_group(0, frame.frame_bind_group, &[]);

        for (slot, draw) in frame.packet.ui.iter().enumerate() {
            let Some(mesh) = draw.render_handle.and_then(|h| frame.ui_meshes.get(h)) else {
                continue;
            };
            rpass.set_bind_group(1, &frame.objects.bind_group, &[frame.objects.offset(slot)]);
            mesh.draw(&mut rpass);
        }
    }
}
