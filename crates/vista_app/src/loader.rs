use std::time::Instant;

use log::info;
use vista_core::{Camera, Scene, SceneDescription, SceneError};

use crate::config::SceneConfig;

/// Reads the scene (and optional UI) files named in `config` and builds
/// the scene.  The camera is `None` when the file does not describe one.
pub fn load_scene(config: &SceneConfig) -> Result<(Scene, Option<Camera>), SceneError> {
    let started = Instant::now();
    info!("loading scene {}", config.path.display());

    let mut description = SceneDescription::load(&config.path)?;
    if let Some(ui) = &config.ui_path {
        info!("loading ui objects {}", ui.display());
        description.load_ui(ui)?;
    }
    let camera = description.camera()?;
    let scene = description.build()?;

    info!(
        "scene ready: {} objects, {} ui objects, {} lights in {:.1} ms",
        scene.len(),
        scene.ui_objects.len(),
        scene.lights.len(),
        started.elapsed().as_secs_f64() * 1000.0
    );
    Ok((scene, camera))
}
