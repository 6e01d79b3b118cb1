use glam::{Mat4, Vec3};
use serde::Deserialize;

/// The vertical component `up` is pushed to before re-normalising after
/// every look rotation.  Keeps `up` close to world vertical so roll cannot
/// accumulate.
const UP_BIAS: f32 = 10.0;

/// Largest allowed |y| of the normalised look direction.  Pitch steps past
/// this are rejected so `at` never lines up with `up`.
const MAX_LOOK_Y: f32 = 0.98;

const EPSILON: f32 = 1e-6;

/// How the camera stores where it is looking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Look {
    /// Look direction relative to the eye; the look target is
    /// `position + front`.
    Direction(Vec3),
    /// Absolute look target in world space.  Moves together with the eye.
    Target(Vec3),
}

/// Perspective parameters.  Aspect ratio is supplied per frame because the
/// surface can be resized at any time.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    pub fovy_degrees: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            fovy_degrees: 90.0,
            znear: 0.1,
            zfar: 1000.0,
        }
    }
}

impl ProjectionConfig {
    /// Right-handed perspective with a `[0, 1]` depth range.
    ///
    /// A non-positive (or NaN) aspect, e.g. from a minimised window, falls
    /// back to `1.0`.
    pub fn matrix(&self, aspect: f32) -> Mat4 {
        let aspect = if aspect > 0.0 && aspect.is_finite() {
            aspect
        } else {
            1.0
        };
        Mat4::perspective_rh(self.fovy_degrees.to_radians(), aspect, self.znear, self.zfar)
    }
}

/// Free-fly camera shared by the frame driver, the controller and the
/// renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    // --- view parameters --------------------------------------------------
    pub position: Vec3,
    pub look: Look,
    /// Kept unit length.
    pub up: Vec3,
    // --- projection parameters --------------------------------------------
    pub projection: ProjectionConfig,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(
            Vec3::new(0.5, 0.5, -0.5),
            Look::Target(Vec3::new(0.5, 0.5, 0.0)),
            Vec3::Y,
        )
    }
}

impl Camera {
    /// Builds a camera with `up` made unit length and perpendicular to the
    /// look direction.  An `up` parallel to the look direction is replaced
    /// by an arbitrary perpendicular axis.
    pub fn new(position: Vec3, look: Look, up: Vec3) -> Self {
        let mut camera = Self {
            position,
            look,
            up: up.try_normalize().unwrap_or(Vec3::Y),
            projection: ProjectionConfig::default(),
        };
        camera.orthogonalize_up();
        camera
    }

    pub fn with_projection(mut self, projection: ProjectionConfig) -> Self {
        self.projection = projection;
        self
    }

    /// World-space point the camera looks at.
    pub fn look_target(&self) -> Vec3 {
        match self.look {
            Look::Direction(front) => self.position + front,
            Look::Target(center) => center,
        }
    }

    fn set_look_target(&mut self, target: Vec3) {
        match &mut self.look {
            Look::Direction(front) => *front = target - self.position,
            Look::Target(center) => *center = target,
        }
    }

    /// Normalised look direction (`at`).  Zero if the target sits on the eye.
    pub fn at(&self) -> Vec3 {
        (self.look_target() - self.position).normalize_or_zero()
    }

    /// Normalised camera-right axis, `at × up`.
    pub fn right(&self) -> Vec3 {
        self.at().cross(self.up).normalize_or_zero()
    }

    /// Build the view matrix with a right-handed look-at.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.look_target(), self.up)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        self.projection.matrix(aspect)
    }

    // ── Look rotation ─────────────────────────────────────────────────────

    /// Swing the look direction sideways along the camera-right axis.
    ///
    /// `step` is the offset applied to the unit look vector, so small steps
    /// are approximately radians.
    pub fn yaw(&mut self, step: f32) {
        let Some((at, reach)) = self.look_vector() else {
            return;
        };
        let right = at.cross(self.up).normalize_or_zero();
        if right == Vec3::ZERO {
            return;
        }
        let Some(new_at) = (at + right * step).try_normalize() else {
            return;
        };
        self.set_look_target(self.position + new_at * reach);
        self.nudge_up();
    }

    /// Tilt the look direction along the current `up` axis, then re-derive
    /// `up` from the new basis.  A step that takes the look direction
    /// further towards vertical than `MAX_LOOK_Y` is ignored; steps back
    /// towards the horizon always apply.
    pub fn pitch(&mut self, step: f32) {
        let Some((at, reach)) = self.look_vector() else {
            return;
        };
        let Some(new_at) = (at + self.up * step).try_normalize() else {
            return;
        };
        if new_at.y.abs() > MAX_LOOK_Y && new_at.y.abs() > at.y.abs() {
            return;
        }
        let right = new_at.cross(self.up).normalize_or_zero();
        if right == Vec3::ZERO {
            return;
        }
        self.up = right.cross(new_at).normalize();
        self.set_look_target(self.position + new_at * reach);
        self.nudge_up();
    }

    /// Mouse-look: horizontal motion yaws, vertical motion pitches (moving
    /// the mouse up looks up).
    pub fn rotate_by_mouse_delta(&mut self, dx: f32, dy: f32, sensitivity: f32) {
        if dx != 0.0 {
            self.yaw(dx * sensitivity);
        }
        if dy != 0.0 {
            self.pitch(-dy * sensitivity);
        }
    }

    // ── Translation ───────────────────────────────────────────────────────

    /// Walk along the camera-relative right (`dx`) and forward (`dz`) axes
    /// projected onto the ground plane.  Looking up or down does not change
    /// the walking speed, and the eye height never changes.
    ///
    /// Right is taken square to the ground-plane forward axis, so any roll
    /// left in `up` cannot skew a diagonal walk.
    pub fn move_local(&mut self, dx: f32, dz: f32, speed: f32) {
        let at = self.at();
        let forward = Vec3::new(at.x, 0.0, at.z).normalize_or_zero();
        let right = if forward == Vec3::ZERO {
            let r = at.cross(self.up);
            Vec3::new(r.x, 0.0, r.z).normalize_or_zero()
        } else {
            forward.cross(Vec3::Y)
        };
        self.translate((right * dx + forward * dz) * speed);
    }

    /// Translate the eye (and the look target when it is absolute) by a
    /// world-space offset.
    pub fn translate(&mut self, offset: Vec3) {
        self.position += offset;
        if let Look::Target(center) = &mut self.look {
            *center += offset;
        }
    }

    // ── Helpers ───────────────────────────────────────────────────────────

    /// Unit look direction plus the distance to the look target.
    fn look_vector(&self) -> Option<(Vec3, f32)> {
        let v = self.look_target() - self.position;
        let reach = v.length();
        (reach > EPSILON).then(|| (v / reach, reach))
    }

    fn orthogonalize_up(&mut self) {
        let at = self.at();
        if at == Vec3::ZERO {
            return;
        }
        self.up = match at.cross(self.up).try_normalize() {
            Some(right) => right.cross(at).normalize(),
            None => at.any_orthonormal_vector(),
        };
    }

    fn nudge_up(&mut self) {
        self.up = Vec3::new(self.up.x, UP_BIAS, self.up.z).normalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn direction_camera() -> Camera {
        Camera::new(Vec3::ZERO, Look::Direction(Vec3::Z), Vec3::Y)
    }

    #[test]
    fn target_and_direction_agree_on_view() {
        let a = Camera::new(Vec3::new(1.0, 2.0, 3.0), Look::Direction(Vec3::Z), Vec3::Y);
        let b = Camera::new(
            Vec3::new(1.0, 2.0, 3.0),
            Look::Target(Vec3::new(1.0, 2.0, 4.0)),
            Vec3::Y,
        );
        assert!(a.view_matrix().abs_diff_eq(b.view_matrix(), 1e-6));
    }

    #[test]
    fn up_stays_unit_after_mouse_look() {
        let mut cam = direction_camera();
        let deltas = [(12.0, -3.0), (-40.0, 25.0), (3.0, 80.0), (0.0, -200.0), (150.0, 0.0)];
        for _ in 0..50 {
            for &(dx, dy) in &deltas {
                cam.rotate_by_mouse_delta(dx, dy, 0.007);
                assert!((cam.up.length() - 1.0).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn look_never_becomes_parallel_to_up() {
        let mut cam = direction_camera();
        for _ in 0..500 {
            cam.rotate_by_mouse_delta(0.0, -50.0, 0.01);
        }
        assert!(cam.at().y.abs() <= MAX_LOOK_Y + 1e-4);
        assert!(cam.at().cross(cam.up).length() > 0.1);
        assert!(cam.view_matrix().is_finite());
    }

    #[test]
    fn steep_start_can_pitch_back_to_horizon() {
        let mut cam = Camera::new(Vec3::ZERO, Look::Direction(Vec3::new(0.0, -1.0, 0.1)), Vec3::Y);
        let start = cam.at();
        assert!(start.y < -MAX_LOOK_Y);
        for _ in 0..100 {
            cam.rotate_by_mouse_delta(0.0, -10.0, 0.007);
        }
        assert!(cam.at().y > -0.9, "still looking down: {}", cam.at());
        assert!(cam.view_matrix().is_finite());
    }

    #[test]
    fn steep_start_cannot_pitch_further_down() {
        let mut cam = Camera::new(Vec3::ZERO, Look::Direction(Vec3::new(0.0, -1.0, 0.1)), Vec3::Y);
        let start = cam.at();
        cam.rotate_by_mouse_delta(0.0, 10.0, 0.007);
        assert!(cam.at().abs_diff_eq(start, 1e-6));
    }

    #[test]
    fn up_parallel_to_look_is_replaced() {
        let cam = Camera::new(Vec3::ZERO, Look::Direction(Vec3::Y), Vec3::Y);
        assert!(cam.at().dot(cam.up).abs() < 1e-6);
        assert!((cam.up.length() - 1.0).abs() < 1e-6);
        assert!(cam.view_matrix().is_finite());

        let mut cam = cam;
        cam.rotate_by_mouse_delta(0.0, 10.0, 0.05);
        assert!(cam.at().y < 1.0 - 1e-4);
    }

    #[test]
    fn tilted_up_is_straightened_without_changing_view() {
        let tilted = Vec3::new(0.0, 1.0, -0.5);
        let cam = Camera::new(Vec3::ZERO, Look::Direction(Vec3::Z), tilted);
        assert!(cam.up.abs_diff_eq(Vec3::Y, 1e-6));
        let raw = Mat4::look_at_rh(Vec3::ZERO, Vec3::Z, tilted);
        assert!(cam.view_matrix().abs_diff_eq(raw, 1e-5));
    }

    #[test]
    fn look_reach_does_not_drift() {
        let mut cam = Camera::default();
        let reach = (cam.look_target() - cam.position).length();
        for i in 0..200 {
            cam.rotate_by_mouse_delta((i % 7) as f32 - 3.0, (i % 5) as f32 - 2.0, 0.01);
        }
        let after = (cam.look_target() - cam.position).length();
        assert!((after - reach).abs() < 1e-4);
    }

    #[test]
    fn yaw_keeps_eye_height_of_target() {
        let mut cam = direction_camera();
        cam.yaw(0.3);
        assert!(cam.at().y.abs() < 1e-6);
        // right of +Z with +Y up (right-handed) is -X
        assert!(cam.at().x < 0.0);
    }

    #[test]
    fn moving_the_mouse_up_looks_up() {
        let mut cam = direction_camera();
        cam.rotate_by_mouse_delta(0.0, -10.0, 0.01);
        assert!(cam.at().y > 0.0);
    }

    #[test]
    fn move_local_ignores_pitch() {
        let mut cam = direction_camera();
        for _ in 0..20 {
            cam.pitch(0.05);
        }
        assert!(cam.at().y > 0.5);
        cam.move_local(0.0, 1.0, 0.25);
        assert!((cam.position.y).abs() < 1e-6);
        assert!((cam.position.length() - 0.25).abs() < 1e-5);
    }

    #[test]
    fn target_moves_with_eye() {
        let mut cam = Camera::default();
        let before = cam.look_target() - cam.position;
        cam.move_local(1.0, 0.0, 0.5);
        cam.translate(Vec3::new(0.0, 0.1, 0.0));
        let after = cam.look_target() - cam.position;
        assert!(before.abs_diff_eq(after, 1e-6));
    }

    #[test]
    fn degenerate_aspect_falls_back() {
        let p = ProjectionConfig::default();
        assert!(p.matrix(0.0).is_finite());
        assert!(p.matrix(f32::NAN).abs_diff_eq(p.matrix(1.0), 1e-6));
    }
}
