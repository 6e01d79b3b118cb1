//! Window, event loop and configuration for the Vista viewer.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use vista_app::{load_scene, App, ViewerConfig};
//!
//! let config = ViewerConfig::load("vista.toml")?;
//! vista_app::init_logging(&config)?;
//! let (scene, camera) = load_scene(&config.scene)?;
//! App::new((), scene, camera.unwrap_or_default())
//!     .with_config(config)
//!     .run()?;
//! ```
//!
//! Mouse look needs pointer capture: click the window to grab the cursor,
//! press Escape (or switch focus away) to release it.

pub mod builder;
mod capture;
pub mod config;
pub mod error;
mod graphics;
pub mod loader;
pub mod logging;
mod runner;
pub mod traits;

pub use builder::App;
pub use config::{SceneConfig, ViewerConfig, WindowConfig};
pub use error::AppError;
pub use loader::load_scene;
pub use logging::init_logging;
pub use traits::ViewerApp;

// Users can build an app against `vista_app` alone.
pub use vista_core::{
    glam, Camera, Color, ControlsConfig, InteractionMode, KeyCode, Scene, SceneContext, Time,
};
