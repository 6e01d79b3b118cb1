use vista_core::{Camera, ControlsConfig, Scene, SceneContext};

use crate::config::ViewerConfig;
use crate::error::AppError;
use crate::traits::ViewerApp;

/// Opens a window on a scene and runs the frame loop until the window
/// closes.
pub struct App<A: ViewerApp> {
    config: ViewerConfig,
    scene: Scene,
    camera: Camera,
    app_state: A,
}

impl<A: ViewerApp> App<A> {
    pub fn new(app_state: A, scene: Scene, camera: Camera) -> Self {
        Self {
            config: ViewerConfig::default(),
            scene,
            camera,
            app_state,
        }
    }

    /// Replaces every setting at once, usually with a loaded `vista.toml`.
    pub fn with_config(mut self, config: ViewerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.config.window.title = title.to_string();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.config.window.width = width;
        self.config.window.height = height;
        self
    }

    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.config.window.vsync = vsync;
        self
    }

    pub fn with_controls(mut self, controls: ControlsConfig) -> Self {
        self.config.controls = controls;
        self
    }

    /// Blocks until the loop exits.
    pub fn run(self) -> Result<(), AppError> {
        let camera = self.camera.with_projection(self.config.projection);
        let ctx = SceneContext::new(self.scene, camera, &self.config.controls);
        crate::runner::run_internal(self.app_state, self.config.window, ctx)
    }
}
