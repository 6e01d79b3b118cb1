use glam::Vec3;
use serde::Deserialize;

use crate::color::Color;

/// Point light with linear + quadratic distance attenuation.
///
/// The renderer evaluates `strength / (1 + linear·d + quadratic·d²)`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PointLight {
    pub position: Vec3,
    pub colour: Color,
    #[serde(default = "default_strength")]
    pub strength: f32,
    #[serde(default)]
    pub linear: f32,
    #[serde(default)]
    pub quadratic: f32,
}

fn default_strength() -> f32 {
    1.0
}
