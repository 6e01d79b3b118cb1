use std::sync::Arc;

use log::{debug, info};
use vista_renderer::{ContextError, EngineContext, Renderer};
use winit::window::Window;

use crate::error::AppError;

pub struct GraphicsState {
    pub surface: wgpu::Surface<'static>,
    pub config: wgpu::SurfaceConfiguration,
    pub renderer: Renderer,
}

impl GraphicsState {
    pub async fn new(window: Arc<Window>, vsync: bool) -> Result<Self, AppError> {
        let size = window.inner_size();
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        // the surface owns its window handle, so no lifetime ties it to `window`
        let surface = instance
            .create_surface(window)
            .map_err(ContextError::from)?;
        let context = EngineContext::new_with_instance(instance, Some(&surface)).await?;

        let caps = surface.get_capabilities(&context.adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or(ContextError::IncompatibleSurface)?;
        let present_mode = if vsync {
            wgpu::PresentMode::Fifo
        } else {
            wgpu::PresentMode::AutoNoVsync
        };

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 1,
        };
        surface.configure(&context.device, &config);
        info!(
            "surface {}x{} {:?} {:?}",
            config.width, config.height, config.format, config.present_mode
        );

        let renderer = Renderer::new(context, config.width, config.height, config.format);

        Ok(Self {
            surface,
            config,
            renderer,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.config.width = width;
            self.config.height = height;
            self.reconfigure();
            self.renderer.resize(width, height);
        }
    }

    /// Re-applies the current configuration after the surface was lost or
    /// became outdated.
    pub fn reconfigure(&mut self) {
        debug!("configuring surface {}x{}", self.config.width, self.config.height);
        self.surface
            .configure(&self.renderer.context.device, &self.config);
    }

    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }
}
