use std::collections::HashMap;

use glam::Vec3;
use log::info;
use serde::Deserialize;

use crate::input::{InputState, KeyCode};
use crate::scene::camera::Camera;
use crate::scene::selection::HighlightFactors;
use crate::scene::world::Scene;

/// Which keyboard layout drives the viewer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionMode {
    /// Held WASD walks the camera every frame.
    #[default]
    Fly,
    /// Key presses edit the selected object (or turn the camera).
    Edit,
}

/// `[controls]` section of the viewer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    pub mode: InteractionMode,
    /// World units per frame while a movement key is held.
    pub move_step: f32,
    /// Look step per pixel of mouse motion.
    pub mouse_sensitivity: f32,
    /// Translation applied by one edit-mode nudge.
    pub nudge_step: f32,
    /// Radians applied by one edit-mode rotation.
    pub rotate_step: f32,
    pub highlight: HighlightFactors,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            mode: InteractionMode::Fly,
            move_step: 0.01,
            mouse_sensitivity: 0.007,
            nudge_step: 0.1,
            rotate_step: 0.1,
            highlight: HighlightFactors::default(),
        }
    }
}

/// One discrete edit action, produced by a fresh key press.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditCommand {
    /// Move the selected object by a world-space offset, or the camera
    /// (eye and target) when nothing is selected.
    Nudge(Vec3),
    /// Rotate the selected object about a local axis.  Without a selection
    /// a Y rotation yaws the camera and an X rotation pitches it.
    Rotate { axis: Vec3, angle: f32 },
    ToggleSelection,
    SelectNext,
    SelectPrevious,
    /// Log the current view matrix.
    LogView,
}

impl EditCommand {
    pub fn apply(self, scene: &mut Scene, camera: &mut Camera, highlight: HighlightFactors) {
        match self {
            EditCommand::Nudge(offset) => match scene.selected() {
                Some(h) => scene.translate(h, offset),
                None => camera.translate(offset),
            },
            EditCommand::Rotate { axis, angle } => match scene.selected() {
                Some(h) => {
                    if let Some(object) = scene.get_mut(h) {
                        object.transform.rotate_local(axis, angle);
                    }
                }
                None if axis == Vec3::Y => camera.yaw(angle),
                None if axis == Vec3::X => camera.pitch(-angle),
                None => {}
            },
            EditCommand::ToggleSelection => scene.toggle_selection(highlight),
            EditCommand::SelectNext => scene.select_next(highlight),
            EditCommand::SelectPrevious => scene.select_previous(highlight),
            EditCommand::LogView => info!("view matrix: {:?}", camera.view_matrix()),
        }
    }
}

/// Maps keys to movement directions and edit commands, and stores every
/// motion parameter.
///
/// Movement bindings are camera-space: positive X is right, positive Z is
/// forward.
///
/// ```rust,ignore
/// use vista_core::{Controller, KeyCode};
/// use glam::Vec3;
///
/// let mut controller = Controller::with_default_wasd();
/// controller.bind(KeyCode::ArrowUp, Vec3::Z);
/// controller.move_step = 0.02;
/// ```
#[derive(Debug, Clone)]
pub struct Controller {
    mappings: HashMap<KeyCode, Vec3>,
    pub move_step: f32,
    pub mouse_sensitivity: f32,
    pub nudge_step: f32,
    pub rotate_step: f32,
    pub highlight: HighlightFactors,
}

impl Default for Controller {
    fn default() -> Self {
        Self::with_default_wasd()
    }
}

impl Controller {
    /// No key bindings, default parameters.
    pub fn new() -> Self {
        let config = ControlsConfig::default();
        Self {
            mappings: HashMap::new(),
            move_step: config.move_step,
            mouse_sensitivity: config.mouse_sensitivity,
            nudge_step: config.nudge_step,
            rotate_step: config.rotate_step,
            highlight: config.highlight,
        }
    }

    /// WASD layout with default parameters.
    pub fn with_default_wasd() -> Self {
        let mut ctl = Self::new();
        ctl.bind_wasd();
        ctl
    }

    /// WASD layout with parameters taken from configuration.
    pub fn from_config(config: &ControlsConfig) -> Self {
        let mut ctl = Self {
            move_step: config.move_step,
            mouse_sensitivity: config.mouse_sensitivity,
            nudge_step: config.nudge_step,
            rotate_step: config.rotate_step,
            highlight: config.highlight,
            ..Self::new()
        };
        ctl.bind_wasd();
        ctl
    }

    fn bind_wasd(&mut self) {
        self.bind(KeyCode::KeyW, Vec3::Z);
        self.bind(KeyCode::KeyS, Vec3::NEG_Z);
        self.bind(KeyCode::KeyA, Vec3::NEG_X);
        self.bind(KeyCode::KeyD, Vec3::X);
    }

    /// Binds `key` to a camera-space direction, replacing any old binding.
    pub fn bind(&mut self, key: KeyCode, dir: Vec3) {
        self.mappings.insert(key, dir);
    }

    /// Sum of the bound directions whose keys are held.  Not normalised, so
    /// diagonal movement is faster.
    pub fn direction(&self, input: &InputState) -> Vec3 {
        self.mappings
            .iter()
            .filter(|(key, _)| input.is_key_held(**key))
            .map(|(_, dir)| *dir)
            .sum()
    }

    /// Walks the camera by one step for every held movement key.
    pub fn apply_held_movement(&self, camera: &mut Camera, input: &InputState) {
        let dir = self.direction(input);
        if dir != Vec3::ZERO {
            camera.move_local(dir.x, dir.z, self.move_step);
        }
    }

    /// Turns the camera by the mouse motion accumulated since last frame.
    /// Nothing happens unless the pointer is captured.
    pub fn apply_mouse_look(&self, camera: &mut Camera, input: &mut InputState) {
        if !input.is_captured() {
            return;
        }
        let (dx, dy) = input.consume_mouse_delta();
        camera.rotate_by_mouse_delta(dx, dy, self.mouse_sensitivity);
    }

    /// Edit-mode key map.
    pub fn command_for(&self, key: KeyCode, shift: bool) -> Option<EditCommand> {
        let nudge = |v: Vec3| Some(EditCommand::Nudge(v * self.nudge_step));
        let rotate = |axis: Vec3, sign: f32| {
            Some(EditCommand::Rotate {
                axis,
                angle: sign * self.rotate_step,
            })
        };

        match (key, shift) {
            (KeyCode::KeyA, false) => nudge(Vec3::X),
            (KeyCode::KeyD, false) => nudge(Vec3::NEG_X),
            (KeyCode::KeyW, false) => nudge(Vec3::Z),
            (KeyCode::KeyS, false) => nudge(Vec3::NEG_Z),
            // Q raises and E lowers, for the camera too (some fly layouts swap them)
            (KeyCode::KeyQ, false) => nudge(Vec3::Y),
            (KeyCode::KeyE, false) => nudge(Vec3::NEG_Y),

            (KeyCode::KeyA, true) => rotate(Vec3::Y, 1.0),
            (KeyCode::KeyD, true) => rotate(Vec3::Y, -1.0),
            (KeyCode::KeyW, true) => rotate(Vec3::X, 1.0),
            (KeyCode::KeyS, true) => rotate(Vec3::X, -1.0),
            (KeyCode::KeyQ, true) => rotate(Vec3::Z, 1.0),
            (KeyCode::KeyE, true) => rotate(Vec3::Z, -1.0),

            (KeyCode::Space, _) => Some(EditCommand::ToggleSelection),
            (KeyCode::ArrowRight, _) => Some(EditCommand::SelectNext),
            (KeyCode::ArrowLeft, _) => Some(EditCommand::SelectPrevious),
            (KeyCode::KeyP, _) => Some(EditCommand::LogView),
            _ => None,
        }
    }
}
