//! RGBA colour used for backgrounds and material terms.
//!
//! Stored as four `f32` values in linear light (0.0 – 1.0).  Scene files
//! carry colours as `[r, g, b]` triples, so the `From<[f32; 3]>` impl is
//! the usual way in.

use serde::Deserialize;

/// Linear-space RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(from = "ColorRepr")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Color {
    // ── Constructors ────────────────────────────────────────────────────────

    /// Opaque colour from red, green, blue components.
    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Colour from all four components.
    #[inline]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    // ── Conversions ─────────────────────────────────────────────────────────

    /// Returns `[r, g, b, a]`.
    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Returns `[r, g, b]` (alpha discarded).
    #[inline]
    pub fn to_rgb_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    // ── Palette ─────────────────────────────────────────────────────────────

    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const GRAY: Self = Self::rgb(0.5, 0.5, 0.5);
}

impl From<[f32; 4]> for Color {
    fn from(a: [f32; 4]) -> Self {
        Self::rgba(a[0], a[1], a[2], a[3])
    }
}

impl From<[f32; 3]> for Color {
    fn from(a: [f32; 3]) -> Self {
        Self::rgb(a[0], a[1], a[2])
    }
}

/// Accepts both `[r, g, b]` and `[r, g, b, a]` in scene files.
#[derive(Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Rgb([f32; 3]),
    Rgba([f32; 4]),
}

impl From<ColorRepr> for Color {
    fn from(repr: ColorRepr) -> Self {
        match repr {
            ColorRepr::Rgb(c) => c.into(),
            ColorRepr::Rgba(c) => c.into(),
        }
    }
}
