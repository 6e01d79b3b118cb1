//! Lit world geometry, drawn in packet order (farthest first).

use log::trace;

use crate::passes::{begin_loaded, PassFrame, RenderPass};
use crate::pipeline::SurfacePipeline;

pub struct WorldPass {
    pipeline: SurfacePipeline,
}

impl WorldPass {
    pub fn new(pipeline: SurfacePipeline) -> Self {
        Self { pipeline }
    }
}

impl RenderPass for WorldPass {
    fn name(&self) -> &str {
        "World Pass"
    }

    fn execute(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        color_view: &wgpu::TextureView,
        depth_view: &wgpu::TextureView,
        frame: &PassFrame<'_>,
    ) {
        let mut rpass = begin_loaded(encoder, self.name(), color_view, depth_view);
        rpass.set_pipeline(&self.pipeline.inner);
        rpass.set_bind_group(0, frame.frame_bind_group, &[]);

        let base = frame.world_slot_base();
        for (i, draw) in frame.packet.world.iter().enumerate() {
            let Some(mesh) = draw.render_handle.and_then(|h| frame.meshes.get(h)) else {
                trace!("object {} has no uploaded mesh", draw.object);
                continue;
            };
            rpass.set_bind_group(1, &frame.objects.bind_group, &[frame.objects.offset(base + i)]);
            mesh.draw(&mut rpass);
        }
    }
}
