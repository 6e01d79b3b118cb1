use std::sync::Arc;

use log::{error, info, warn};
use vista_core::{FrameDriver, FrameOutcome, FramePacket, InputEvent, SceneContext};
use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::capture;
use crate::config::WindowConfig;
use crate::error::AppError;
use crate::graphics::GraphicsState;
use crate::traits::{UpdateHook, ViewerApp};

struct Runner<A: ViewerApp> {
    app: A,
    config: WindowConfig,
    driver: FrameDriver,
    window: Option<Arc<Window>>,
    graphics: Option<GraphicsState>,
    captured: bool,
    /// First fatal error; reported by `run_internal` once the loop exits.
    failure: Option<AppError>,
}

impl<A: ViewerApp> Runner<A> {
    fn new(app: A, config: WindowConfig, ctx: SceneContext) -> Self {
        Self {
            app,
            config,
            driver: FrameDriver::new(ctx),
            window: None,
            graphics: None,
            captured: false,
            failure: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: AppError) {
        error!("{err}");
        self.failure.get_or_insert(err);
        event_loop.exit();
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        let attributes = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(winit::dpi::PhysicalSize::new(
                self.config.width,
                self.config.height,
            ));
        let window = Arc::new(event_loop.create_window(attributes)?);

        let mut gfx = pollster::block_on(GraphicsState::new(window.clone(), self.config.vsync))?;
        gfx.renderer.upload_scene(&mut self.driver.ctx.scene);

        let (width, height) = gfx.size();
        self.driver.ctx.surface_size = (width, height);
        self.app.setup(&mut self.driver.ctx);
        self.driver.push(InputEvent::Resized { width, height });

        info!("click the window to capture the mouse, Escape to release it");
        self.window = Some(window);
        self.graphics = Some(gfx);
        Ok(())
    }

    fn set_captured(&mut self, captured: bool) {
        let Some(window) = &self.window else {
            return;
        };
        if captured == self.captured {
            return;
        }
        if captured {
            match capture::engage(window) {
                Ok(mode) => info!("cursor grabbed ({mode:?})"),
                Err(err) => {
                    warn!("could not grab cursor: {err}");
                    return;
                }
            }
        } else {
            capture::release(window);
        }
        self.captured = captured;
        self.driver.push(InputEvent::CaptureChanged(captured));
    }

    fn draw(&mut self, event_loop: &ActiveEventLoop, packet: &FramePacket) {
        let Some(gfx) = &mut self.graphics else {
            return;
        };
        let frame = match gfx.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gfx.reconfigure();
                return;
            }
            Err(wgpu::SurfaceError::Timeout) => {
                warn!("surface timed out, skipping frame");
                return;
            }
            Err(err) => {
                error!("surface error: {err}");
                event_loop.exit();
                return;
            }
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        gfx.renderer.render(packet, &view);
        frame.present();
    }
}

impl<A: ViewerApp> ApplicationHandler for Runner<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.init(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.driver.push(InputEvent::Shutdown),
            WindowEvent::Resized(size) => {
                if let Some(gfx) = &mut self.graphics {
                    gfx.resize(size.width, size.height);
                }
                if size.width > 0 && size.height > 0 {
                    self.driver.push(InputEvent::Resized {
                        width: size.width,
                        height: size.height,
                    });
                }
            }
            WindowEvent::Focused(false) => {
                self.set_captured(false);
                self.driver.push(InputEvent::FocusLost);
            }
            WindowEvent::ModifiersChanged(modifiers) => self.driver.push(InputEvent::Modifiers {
                shift: modifiers.state().shift_key(),
            }),
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => self.set_captured(true),
            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(key) = event.physical_key else {
                    return;
                };
                match event.state {
                    ElementState::Pressed if key == KeyCode::Escape => self.set_captured(false),
                    ElementState::Pressed => self.driver.push(InputEvent::KeyDown {
                        key,
                        repeat: event.repeat,
                    }),
                    ElementState::Released => self.driver.push(InputEvent::KeyUp { key }),
                }
            }
            _ => {}
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _id: DeviceId, event: DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            self.driver.push(InputEvent::MouseMotion {
                dx: dx as f32,
                dy: dy as f32,
            });
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.graphics.is_none() {
            return;
        }

        let outcome = self.driver.frame(&mut UpdateHook(&mut self.app));
        match outcome {
            FrameOutcome::Draw(packet) => self.draw(event_loop, &packet),
            FrameOutcome::Exit => {
                info!("shutting down");
                event_loop.exit();
            }
        }
    }
}

pub(crate) fn run_internal<A: ViewerApp>(
    app: A,
    config: WindowConfig,
    ctx: SceneContext,
) -> Result<(), AppError> {
    let mut runner = Runner::new(app, config, ctx);
    let event_loop = EventLoop::new()?;
    // one frame per `about_to_wait`, paced by presentation (Fifo when vsync
    // is on); no redraw requests are needed
    event_loop.set_control_flow(ControlFlow::Poll);
    event_loop.run_app(&mut runner)?;
    match runner.failure {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
