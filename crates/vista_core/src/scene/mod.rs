//! Scene model: objects, lights, camera, selection and the controller that
//! edits them.

pub mod camera;
pub mod controller;
pub mod description;
pub mod light;
pub mod object;
pub mod selection;
pub mod world;

pub use camera::{Camera, Look, ProjectionConfig};
pub use controller::{Controller, ControlsConfig, EditCommand, InteractionMode};
pub use description::SceneDescription;
pub use light::PointLight;
pub use object::{Geometry, Material, ObjectKind, SceneObject, UiObject};
pub use selection::{HighlightFactors, Selection};
pub use world::{Handle, Scene};
