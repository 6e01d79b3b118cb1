use vista_core::{FrameHook, SceneContext, Time};

/// Application callbacks driven by [`crate::App`].
///
/// All methods have empty defaults; `()` is a valid app that only views the
/// scene.
#[allow(unused_variables)]
pub trait ViewerApp {
    /// Called once, after the window and GPU are ready and the scene has
    /// been uploaded.
    fn setup(&mut self, ctx: &mut SceneContext) {}

    /// Called every frame after input has been applied and before the frame
    /// packet is built.  `ctx.request_exit()` stops the loop.
    fn update(&mut self, ctx: &mut SceneContext, time: Time) {}

    /// Called inside the frame, before `update`, when the drawable surface
    /// has changed size (and once on the first frame).
    fn on_resize(&mut self, size: (u32, u32), ctx: &mut SceneContext) {}
}

impl ViewerApp for () {}

/// Lets the frame driver call into a [`ViewerApp`].
pub(crate) struct UpdateHook<'a, A>(pub &'a mut A);

impl<A: ViewerApp> FrameHook for UpdateHook<'_, A> {
    fn on_update(&mut self, ctx: &mut SceneContext, time: Time) {
        self.0.update(ctx, time);
    }

    fn on_resize(&mut self, ctx: &mut SceneContext, size: (u32, u32)) {
        self.0.on_resize(size, ctx);
    }
}
