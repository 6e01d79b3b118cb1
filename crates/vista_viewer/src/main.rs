//! `vista_viewer [scene.json]`
//!
//! Reads `vista.toml` from the working directory (all settings optional),
//! loads the scene and opens a window on it.  A path on the command line
//! overrides `[scene] path`.

use anyhow::Context;
use log::debug;
use vista_app::{load_scene, App, SceneContext, Time, ViewerApp, ViewerConfig};

const CONFIG_PATH: &str = "vista.toml";

/// Reports the frame rate at debug level once a second.
#[derive(Default)]
struct Viewer {
    frames: u32,
    window_start: f64,
}

impl ViewerApp for Viewer {
    fn update(&mut self, _ctx: &mut SceneContext, time: Time) {
        self.frames += 1;
        let elapsed = time.elapsed - self.window_start;
        if elapsed >= 1.0 {
            debug!("{:.1} fps", self.frames as f64 / elapsed);
            self.frames = 0;
            self.window_start = time.elapsed;
        }
    }
}

fn main() -> anyhow::Result<()> {
    let mut config = ViewerConfig::load(CONFIG_PATH)?;
    vista_app::init_logging(&config).context("installing logger")?;

    if let Some(path) = std::env::args_os().nth(1) {
        config.scene.path = path.into();
    }

    let (scene, camera) = load_scene(&config.scene)
        .with_context(|| format!("loading scene {}", config.scene.path.display()))?;

    App::new(Viewer::default(), scene, camera.unwrap_or_default())
        .with_config(config)
        .run()?;
    Ok(())
}
