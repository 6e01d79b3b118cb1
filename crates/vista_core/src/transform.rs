//! Local transform of a scene object: position, rotation (matrix), scale.
//!
//! `Transform` is `Copy` and `Default`.  Rotation is kept as a full 4×4
//! matrix because incremental rotation commands multiply into it in place;
//! only the upper-left 3×3 is ever non-identity.
//!
//! # Example
//! ```rust,ignore
//! use vista_core::Transform;
//! use glam::Vec3;
//!
//! let mut t = Transform::from_position(Vec3::new(0.0, 0.0, 0.5));
//! t.rotate_local(Vec3::Y, 0.1);
//! let m = t.model_matrix(Vec3::new(0.5, 0.5, 0.5), None);
//! ```

use glam::{EulerRot, Mat4, Vec3};

/// Per-object local transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Local translation (the object's offset from its mesh coordinates).
    pub position: Vec3,
    /// Pure rotation.  Translation and scale are never baked in here.
    pub rotation: Mat4,
    /// Non-uniform scale factor.
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// No translation, no rotation, uniform scale 1.
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Mat4::IDENTITY,
        scale: Vec3::ONE,
    };

    /// Construct with a position, identity rotation and unit scale.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// Construct a rotation from XYZ Euler angles given in degrees.
    pub fn with_euler_degrees(mut self, degrees: Vec3) -> Self {
        self.rotation = Mat4::from_euler(
            EulerRot::XYZ,
            degrees.x.to_radians(),
            degrees.y.to_radians(),
            degrees.z.to_radians(),
        );
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Apply a translation offset.
    pub fn translate(&mut self, offset: Vec3) {
        self.position += offset;
    }

    /// Rotate by `angle` radians about one of the object's *local* axes.
    ///
    /// The new rotation is post-multiplied, so repeated calls accumulate in
    /// the object's own frame.  Floating-point drift away from a pure
    /// rotation is not corrected.
    pub fn rotate_local(&mut self, axis: Vec3, angle: f32) {
        self.rotation *= Mat4::from_axis_angle(axis, angle);
    }

    /// Multiply every scale component by `factor`.
    pub fn scale_by(&mut self, factor: f32) {
        self.scale *= factor;
    }

    /// Build the model matrix with rotation and scale pivoting on `centroid`.
    ///
    /// Composition, object-local outward:
    /// `parent * T(position) * T(centroid) * R * S * T(-centroid)`.
    pub fn model_matrix(&self, centroid: Vec3, parent: Option<Mat4>) -> Mat4 {
        let local = Mat4::from_translation(self.position)
            * Mat4::from_translation(centroid)
            * self.rotation
            * Mat4::from_scale(self.scale)
            * Mat4::from_translation(-centroid);

        match parent {
            Some(parent) => parent * local,
            None => local,
        }
    }
}
