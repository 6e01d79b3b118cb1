//! wgpu instance, adapter, device and queue shared by the renderer and the
//! window layer.

use std::sync::Arc;

use log::{error, info};
use thiserror::Error;

pub struct EngineContext {
    pub instance: wgpu::Instance,
    pub adapter: wgpu::Adapter,
    pub device: Arc<wgpu::Device>,
    pub queue: Arc<wgpu::Queue>,
}

#[derive(Debug, Error)]
pub enum ContextError {
    #[error("no suitable GPU adapter found")]
    AdapterUnavailable,
    #[error("device request failed: {0}")]
    DeviceRequest(#[from] wgpu::RequestDeviceError),
    #[error("could not create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("surface reports no supported texture format")]
    IncompatibleSurface,
}

impl EngineContext {
    /// Context without a surface, for offscreen rendering.
    pub async fn new() -> Result<Self, ContextError> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        Self::new_with_instance(instance, None).await
    }

    /// Picks an adapter that can present to `compatible_surface`, when given.
    pub async fn new_with_instance(
        instance: wgpu::Instance,
        compatible_surface: Option<&wgpu::Surface<'_>>,
    ) -> Result<Self, ContextError> {
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface,
                force_fallback_adapter: false,
            })
            .await
            .ok_or(ContextError::AdapterUnavailable)?;

        let info = adapter.get_info();
        info!("selected adapter: {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Vista Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                        .using_resolution(adapter.limits()),
                    ..Default::default()
                },
                None,
            )
            .await?;

        // shader and pipeline validation failures are reported here instead
        // of aborting the process
        device.on_uncaptured_error(Box::new(|err| error!("wgpu: {err}")));

        Ok(Self {
            instance,
            adapter,
            device: Arc::new(device),
            queue: Arc::new(queue),
        })
    }
}
