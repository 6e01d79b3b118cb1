//! The frame driver: one call per display refresh.
//!
//! Each frame runs the same fixed sequence:
//!
//! 1. advance the clock,
//! 2. apply queued host events (key state, edit commands, capture, resize),
//! 3. walk the camera for held keys (fly mode) and apply mouse-look,
//! 4. run the application hook,
//! 5. compose transforms and build the [`FramePacket`].
//!
//! ```rust,ignore
//! let mut driver = FrameDriver::new(SceneContext::new(scene, camera, &controls));
//! driver.push(InputEvent::KeyDown { key: KeyCode::KeyW, repeat: false });
//! match driver.frame(&mut ()) {
//!     FrameOutcome::Draw(packet) => renderer.render(&packet, &view),
//!     FrameOutcome::Exit => event_loop.exit(),
//! }
//! ```

pub mod events;
pub mod order;
pub mod packet;

use log::{debug, info};

use crate::input::InputState;
use crate::scene::camera::Camera;
use crate::scene::controller::{Controller, ControlsConfig, InteractionMode};
use crate::scene::world::Scene;
use crate::time::{Time, TimeClock};

pub use events::{EventQueue, InputEvent};
pub use order::back_to_front;
pub use packet::{CameraPacket, FramePacket, UiDraw, WorldDraw};

/// All mutable viewer state, owned in one place and threaded through every
/// frame.
#[derive(Debug)]
pub struct SceneContext {
    pub scene: Scene,
    pub camera: Camera,
    pub input: InputState,
    pub controller: Controller,
    pub mode: InteractionMode,
    /// Drawable size in physical pixels.
    pub surface_size: (u32, u32),
    exit_requested: bool,
}

impl SceneContext {
    pub fn new(scene: Scene, camera: Camera, controls: &ControlsConfig) -> Self {
        Self {
            scene,
            camera,
            input: InputState::new(),
            controller: Controller::from_config(controls),
            mode: controls.mode,
            surface_size: (1, 1),
            exit_requested: false,
        }
    }

    /// Stop the frame loop after the current frame.
    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    /// Width / height.  1.0 if the surface has no height.
    pub fn aspect(&self) -> f32 {
        let (w, h) = self.surface_size;
        if h == 0 {
            1.0
        } else {
            w as f32 / h as f32
        }
    }
}

/// Application logic run inside the frame, after input and before the
/// packet is built.
#[allow(unused_variables)]
pub trait FrameHook {
    fn on_update(&mut self, ctx: &mut SceneContext, time: Time) {}

    /// A queued resize was applied; `ctx.surface_size` already holds `size`.
    fn on_resize(&mut self, ctx: &mut SceneContext, size: (u32, u32)) {}
}

impl FrameHook for () {}

#[derive(Debug)]
pub enum FrameOutcome {
    Draw(FramePacket),
    Exit,
}

pub struct FrameDriver {
    pub ctx: SceneContext,
    queue: EventQueue,
    clock: TimeClock,
}

impl FrameDriver {
    pub fn new(ctx: SceneContext) -> Self {
        Self {
            ctx,
            queue: EventQueue::new(),
            clock: TimeClock::new(),
        }
    }

    /// Queue a host event for the next frame.
    pub fn push(&mut self, event: InputEvent) {
        self.queue.push(event);
    }

    /// Run one frame using the wall clock.
    pub fn frame(&mut self, hook: &mut dyn FrameHook) -> FrameOutcome {
        let now = self.clock.now();
        self.frame_at(now, hook)
    }

    /// Run one frame at an explicit timestamp (seconds since start).
    pub fn frame_at(&mut self, now: f64, hook: &mut dyn FrameHook) -> FrameOutcome {
        let time = self.clock.tick_at(now);
        self.apply_events(hook);
        if self.ctx.exit_requested {
            return FrameOutcome::Exit;
        }

        let ctx = &mut self.ctx;
        if ctx.mode == InteractionMode::Fly {
            ctx.controller.apply_held_movement(&mut ctx.camera, &ctx.input);
        }
        ctx.controller.apply_mouse_look(&mut ctx.camera, &mut ctx.input);

        hook.on_update(ctx, time);
        if ctx.exit_requested {
            return FrameOutcome::Exit;
        }

        FrameOutcome::Draw(FramePacket::build(&ctx.scene, &ctx.camera, ctx.aspect()))
    }

    fn apply_events(&mut self, hook: &mut dyn FrameHook) {
        let ctx = &mut self.ctx;
        for event in self.queue.drain() {
            match event {
                InputEvent::KeyDown { key, repeat } => {
                    let fresh = ctx.input.key_down(key, repeat);
                    if fresh && ctx.mode == InteractionMode::Edit {
                        if let Some(cmd) = ctx.controller.command_for(key, ctx.input.shift()) {
                            debug!("edit command {cmd:?}");
                            cmd.apply(&mut ctx.scene, &mut ctx.camera, ctx.controller.highlight);
                        }
                    }
                }
                InputEvent::KeyUp { key } => ctx.input.key_up(key),
                InputEvent::Modifiers { shift } => ctx.input.set_shift(shift),
                InputEvent::MouseMotion { dx, dy } => ctx.input.add_mouse_motion(dx, dy),
                InputEvent::CaptureChanged(captured) => {
                    if captured != ctx.input.is_captured() {
                        info!("pointer capture {}", if captured { "engaged" } else { "released" });
                    }
                    ctx.input.set_captured(captured);
                }
                InputEvent::FocusLost => ctx.input.release_all(),
                InputEvent::Resized { width, height } => {
                    ctx.surface_size = (width, height);
                    hook.on_resize(ctx, (width, height));
                }
                InputEvent::Shutdown => ctx.exit_requested = true,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::input::KeyCode;
    use crate::scene::camera::Look;

    fn driver(mode: InteractionMode) -> FrameDriver {
        let camera = Camera::new(Vec3::ZERO, Look::Direction(Vec3::Z), Vec3::Y);
        let controls = ControlsConfig {
            mode,
            ..ControlsConfig::default()
        };
        FrameDriver::new(SceneContext::new(Scene::new(), camera, &controls))
    }

    #[derive(Default)]
    struct Recorder {
        resizes: Vec<(u32, u32)>,
        updates: usize,
    }

    impl FrameHook for Recorder {
        fn on_update(&mut self, _ctx: &mut SceneContext, _time: Time) {
            self.updates += 1;
        }

        fn on_resize(&mut self, ctx: &mut SceneContext, size: (u32, u32)) {
            assert_eq!(ctx.surface_size, size);
            // resizes land before the update of the same frame
            assert_eq!(self.resizes.len(), self.updates);
            self.resizes.push(size);
        }
    }

    #[test]
    fn resize_reaches_the_hook_inside_the_frame() {
        let mut d = driver(InteractionMode::Fly);
        let mut hook = Recorder::default();
        d.push(InputEvent::Resized { width: 800, height: 400 });
        assert!(hook.resizes.is_empty());

        d.frame_at(0.0, &mut hook);
        assert_eq!(hook.resizes, vec![(800, 400)]);
        assert_eq!(d.ctx.aspect(), 2.0);

        d.frame_at(0.1, &mut hook);
        assert_eq!(hook.resizes.len(), 1);
        assert_eq!(hook.updates, 2);
    }

    #[test]
    fn held_key_moves_every_frame_until_released() {
        let mut d = driver(InteractionMode::Fly);
        d.push(InputEvent::KeyDown { key: KeyCode::KeyW, repeat: false });
        for i in 0..5 {
            d.frame_at(i as f64 / 60.0, &mut ());
        }
        d.push(InputEvent::KeyUp { key: KeyCode::KeyW });
        d.frame_at(5.0 / 60.0, &mut ());
        assert!(d.ctx.camera.position.abs_diff_eq(Vec3::new(0.0, 0.0, 0.05), 1e-5));
    }

    #[test]
    fn focus_loss_releases_keys() {
        let mut d = driver(InteractionMode::Fly);
        d.push(InputEvent::KeyDown { key: KeyCode::KeyW, repeat: false });
        d.push(InputEvent::FocusLost);
        d.frame_at(0.0, &mut ());
        assert_eq!(d.ctx.camera.position, Vec3::ZERO);
    }

    #[test]
    fn q_raises_and_e_lowers_the_camera_without_a_selection() {
        let mut d = driver(InteractionMode::Edit);
        d.push(InputEvent::KeyDown { key: KeyCode::KeyQ, repeat: false });
        d.frame_at(0.0, &mut ());
        assert!(d.ctx.camera.position.abs_diff_eq(Vec3::new(0.0, 0.1, 0.0), 1e-6));

        d.push(InputEvent::KeyUp { key: KeyCode::KeyQ });
        d.push(InputEvent::KeyDown { key: KeyCode::KeyE, repeat: false });
        d.push(InputEvent::KeyDown { key: KeyCode::KeyE, repeat: false });
        d.frame_at(0.1, &mut ());
        assert!(d.ctx.camera.position.abs_diff_eq(Vec3::ZERO, 1e-6));
    }

    #[test]
    fn edit_mode_nudges_once_instead_of_walking() {
        let mut d = driver(InteractionMode::Edit);
        d.push(InputEvent::KeyDown { key: KeyCode::KeyW, repeat: false });
        d.frame_at(0.0, &mut ());
        let nudged = Vec3::new(0.0, 0.0, 0.1);
        assert!(d.ctx.camera.position.abs_diff_eq(nudged, 1e-6));

        // still held: no per-frame walking in edit mode
        for i in 1..10 {
            d.frame_at(i as f64 / 60.0, &mut ());
        }
        assert!(d.ctx.camera.position.abs_diff_eq(nudged, 1e-6));
    }

    #[test]
    fn resize_updates_aspect() {
        let mut d = driver(InteractionMode::Fly);
        d.push(InputEvent::Resized { width: 1600, height: 900 });
        d.frame_at(0.0, &mut ());
        assert!((d.ctx.aspect() - 16.0 / 9.0).abs() < 1e-6);
    }

    #[test]
    fn shutdown_and_hook_exit() {
        let mut d = driver(InteractionMode::Fly);
        d.push(InputEvent::Shutdown);
        assert!(matches!(d.frame_at(0.0, &mut ()), FrameOutcome::Exit));

        struct QuitAfter(u64);
        impl FrameHook for QuitAfter {
            fn on_update(&mut self, ctx: &mut SceneContext, time: Time) {
                if time.frame_count >= self.0 {
                    ctx.request_exit();
                }
            }
        }
        let mut d = driver(InteractionMode::Fly);
        let mut hook = QuitAfter(2);
        assert!(matches!(d.frame_at(0.0, &mut hook), FrameOutcome::Draw(_)));
        assert!(matches!(d.frame_at(0.1, &mut hook), FrameOutcome::Draw(_)));
        assert!(matches!(d.frame_at(0.2, &mut hook), FrameOutcome::Exit));
    }
}
