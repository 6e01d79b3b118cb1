//! `vista.toml`: window, scene paths, projection and controls.
//!
//! Every table and key is optional; a missing file gives the defaults.
//!
//! ```toml
//! log_level = "debug"
//!
//! [window]
//! title = "Vista"
//! width = 1280
//! height = 720
//! vsync = true
//!
//! [scene]
//! path = "assets/scenes/demo.json"
//! ui_path = "assets/scenes/demo_ui.json"
//!
//! [projection]
//! fovy_degrees = 90.0
//! znear = 0.1
//! zfar = 1000.0
//!
//! [controls]
//! mode = "edit"
//! move_step = 0.01
//! ```

use std::path::{Path, PathBuf};

use log::LevelFilter;
use serde::Deserialize;
use vista_core::{ControlsConfig, ProjectionConfig};

use crate::error::AppError;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub window: WindowConfig,
    pub scene: SceneConfig,
    pub projection: ProjectionConfig,
    pub controls: ControlsConfig,
    /// `off`, `error`, `warn`, `info`, `debug` or `trace`.
    pub log_level: String,
    /// File this configuration was read from; `None` when the defaults
    /// were used.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            scene: SceneConfig::default(),
            projection: ProjectionConfig::default(),
            controls: ControlsConfig::default(),
            log_level: "info".to_string(),
            source: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Vista".to_string(),
            width: 1280,
            height: 720,
            vsync: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub path: PathBuf,
    /// Screen-space overlay objects, drawn before the world.
    pub ui_path: Option<PathBuf>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("assets/scenes/demo.json"),
            ui_path: None,
        }
    }
}

impl ViewerConfig {
    /// Reads `path`.  A file that does not exist yields the defaults.
    ///
    /// Nothing is logged here: this runs before the logger exists.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(text) => {
                let mut config = Self::from_toml(&text).map_err(|source| AppError::Config {
                    path: path.to_path_buf(),
                    source,
                })?;
                config.source = Some(path.to_path_buf());
                Ok(config)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(AppError::ConfigRead {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Parsed `log_level`; `None` for an unknown name.
    pub fn log_level(&self) -> Option<LevelFilter> {
        self.log_level.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use vista_core::InteractionMode;

    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = ViewerConfig::from_toml("").unwrap();
        assert_eq!(cfg.window.title, "Vista");
        assert_eq!((cfg.window.width, cfg.window.height), (1280, 720));
        assert!(cfg.window.vsync);
        assert_eq!(cfg.scene.path, PathBuf::from("assets/scenes/demo.json"));
        assert_eq!(cfg.controls.mode, InteractionMode::Fly);
        assert_eq!(cfg.log_level(), Some(LevelFilter::Info));
        assert_eq!(cfg.source, None);
    }

    #[test]
    fn partial_tables_keep_other_defaults() {
        let cfg = ViewerConfig::from_toml(
            r#"
            log_level = "debug"

            [window]
            width = 800

            [scene]
            ui_path = "hud.json"

            [controls]
            mode = "edit"
            nudge_step = 0.5
            "#,
        )
        .unwrap();
        assert_eq!(cfg.window.width, 800);
        assert_eq!(cfg.window.height, 720);
        assert_eq!(cfg.scene.ui_path, Some(PathBuf::from("hud.json")));
        assert_eq!(cfg.controls.mode, InteractionMode::Edit);
        assert_eq!(cfg.controls.nudge_step, 0.5);
        assert_eq!(cfg.controls.move_step, ControlsConfig::default().move_step);
        assert_eq!(cfg.log_level(), Some(LevelFilter::Debug));
    }

    #[test]
    fn projection_overrides() {
        let cfg = ViewerConfig::from_toml("[projection]\nfovy_degrees = 60.0\n").unwrap();
        assert_eq!(cfg.projection.fovy_degrees, 60.0);
        assert_eq!(cfg.projection.znear, ProjectionConfig::default().znear);
    }

    #[test]
    fn unknown_mode_is_an_error() {
        assert!(ViewerConfig::from_toml("[controls]\nmode = \"orbit\"\n").is_err());
    }

    #[test]
    fn unknown_log_level_is_not_parsed() {
        let cfg = ViewerConfig::from_toml("log_level = \"loud\"").unwrap();
        assert_eq!(cfg.log_level(), None);
    }

    #[test]
    fn missing_file_is_default() {
        let cfg = ViewerConfig::load("definitely/not/here/vista.toml").unwrap();
        assert_eq!(cfg.window.title, "Vista");
        assert_eq!(cfg.source, None);
    }
}
