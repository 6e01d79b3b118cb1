//! CPU-side description of one frame, handed to the renderer.
//!
//! The packet decouples scene logic from GPU passes: the renderer sees
//! matrices, materials and mesh handles, never the scene itself.

use glam::{Mat4, Vec3};

use crate::color::Color;
use crate::frame::order::back_to_front;
use crate::scene::camera::Camera;
use crate::scene::light::PointLight;
use crate::scene::object::Material;
use crate::scene::world::Scene;

// ── Camera ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPacket {
    pub view: Mat4,
    pub projection: Mat4,
    pub eye: Vec3,
}

// ── Draws ───────────────────────────────────────────────────────────────────

/// One world-object draw.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldDraw {
    /// Index into [`Scene::objects`].
    pub object: usize,
    /// Renderer mesh slot; `None` until the scene has been uploaded.
    pub render_handle: Option<usize>,
    pub model: Mat4,
    pub normal: Mat4,
    pub material: Material,
    /// Distance from the eye to the world centroid (the sort key).
    pub distance: f32,
}

/// One clip-space overlay draw.
#[derive(Debug, Clone, PartialEq)]
pub struct UiDraw {
    /// Index into [`Scene::ui_objects`].
    pub object: usize,
    pub render_handle: Option<usize>,
    pub color: Color,
}

// ── Frame packet ────────────────────────────────────────────────────────────

/// Everything the renderer needs for one frame.  UI draws go first, then the
/// world draws in the order given (farthest first).
#[derive(Debug, Clone, PartialEq)]
pub struct FramePacket {
    pub clear_color: Color,
    pub camera: CameraPacket,
    pub lights: Vec<PointLight>,
    pub ui: Vec<UiDraw>,
    pub world: Vec<WorldDraw>,
}

impl FramePacket {
    pub fn build(scene: &Scene, camera: &Camera, aspect: f32) -> Self {
        let frame = scene.compose(camera, aspect);
        let objects = scene.objects();
        let models: Vec<Mat4> = frame.objects.iter().map(|o| o.model).collect();

        let world = back_to_front(scene, &models, frame.eye)
            .into_iter()
            .map(|(index, distance)| {
                let transforms = frame.objects[index];
                WorldDraw {
                    object: index,
                    render_handle: objects[index].render_handle,
                    model: transforms.model,
                    normal: transforms.normal,
                    material: objects[index].material,
                    distance,
                }
            })
            .collect();

        let ui = scene
            .ui_objects
            .iter()
            .enumerate()
            .map(|(index, ui)| UiDraw {
                object: index,
                render_handle: ui.render_handle,
                color: ui.color,
            })
            .collect();

        Self {
            clear_color: scene.background,
            camera: CameraPacket {
                view: frame.view,
                projection: frame.projection,
                eye: frame.eye,
            },
            lights: scene.lights.clone(),
            ui,
            world,
        }
    }

    /// World draw indices in submission order.
    pub fn world_order(&self) -> Vec<usize> {
        self.world.iter().map(|d| d.object).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::camera::Look;
    use crate::scene::object::{Geometry, ObjectKind, SceneObject};
    use crate::transform::Transform;

    #[test]
    fn packet_carries_composed_transforms() {
        let mut scene = Scene::new();
        let cube = || Geometry::cuboid(Vec3::ZERO, Vec3::ONE);
        scene
            .add(
                SceneObject::new("base", ObjectKind::Cube, cube()).with_transform(
                    Transform::from_position(Vec3::new(0.0, 1.0, 4.0))
                        .with_euler_degrees(Vec3::new(0.0, 30.0, 0.0))
                        .with_scale(Vec3::new(2.0, 1.0, 0.5)),
                ),
            )
            .unwrap();
        scene
            .add(
                SceneObject::new("child", ObjectKind::Cube, cube())
                    .with_transform(Transform::from_position(Vec3::X))
                    .with_parent("base"),
            )
            .unwrap();
        let camera = Camera::new(Vec3::new(1.0, 2.0, -3.0), Look::Direction(Vec3::Z), Vec3::Y);

        let frame = scene.compose(&camera, 1.5);
        let packet = FramePacket::build(&scene, &camera, 1.5);

        assert_eq!(packet.camera.view, frame.view);
        assert_eq!(packet.camera.projection, frame.projection);
        assert_eq!(packet.camera.eye, frame.eye);
        assert_eq!(packet.world.len(), frame.objects.len());
        for draw in &packet.world {
            assert_eq!(draw.model, frame.objects[draw.object].model);
            assert_eq!(draw.normal, frame.objects[draw.object].normal);
        }
    }
}
