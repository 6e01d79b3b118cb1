//! `vista_core` — scene, camera and input logic for the Vista viewer.
//!
//! Nothing in this crate touches the GPU or the window system; the frame
//! driver turns host events into a [`FramePacket`] that `vista_renderer`
//! draws.
//!
//! | Module      | Responsibility                                          |
//! |-------------|---------------------------------------------------------|
//! | `transform` | Position / rotation / scale, centroid-pivot model matrix |
//! | `scene`     | Objects, lights, camera, selection, scene files          |
//! | `compose`   | Parent hierarchy, normal matrices                       |
//! | `frame`     | Event queue, frame driver, draw order, frame packet     |
//! | `input`     | Held keys, modifier and pointer-capture state           |

pub mod color;
pub mod compose;
pub mod error;
pub mod frame;
pub mod input;
pub mod scene;
pub mod time;
pub mod transform;

pub use color::Color;
pub use compose::{normal_matrix, FrameTransforms, ObjectTransforms};
pub use error::SceneError;
pub use frame::{
    CameraPacket, EventQueue, FrameDriver, FrameHook, FrameOutcome, FramePacket, InputEvent,
    SceneContext, UiDraw, WorldDraw,
};
pub use input::{InputState, KeyCode};
pub use scene::{
    Camera, Controller, ControlsConfig, EditCommand, Geometry, Handle, HighlightFactors,
    InteractionMode, Look, Material, ObjectKind, PointLight, ProjectionConfig, Scene,
    SceneDescription, SceneObject, Selection, UiObject,
};
pub use time::{Time, TimeClock};
pub use transform::Transform;

pub use glam;
