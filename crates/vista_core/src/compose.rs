//! Per-frame transform composition: model matrices through the parent
//! hierarchy, normal matrices, and the camera matrices.

use glam::{Mat4, Vec3};
use log::debug;

use crate::scene::camera::Camera;
use crate::scene::world::Scene;

/// Determinants below this are treated as singular.
const SINGULAR_EPSILON: f32 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectTransforms {
    pub model: Mat4,
    /// Inverse-transpose of `model`, for transforming normals.
    pub normal: Mat4,
}

/// Everything a frame needs to place objects on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameTransforms {
    pub view: Mat4,
    pub projection: Mat4,
    pub eye: Vec3,
    /// Same order as [`Scene::objects`].
    pub objects: Vec<ObjectTransforms>,
}

/// Inverse-transpose of `model`.  A singular model (e.g. a zero scale
/// component) has no inverse; identity is used instead.
pub fn normal_matrix(model: &Mat4) -> Mat4 {
    let det = model.determinant();
    if !det.is_finite() || det.abs() < SINGULAR_EPSILON {
        return Mat4::IDENTITY;
    }
    model.inverse().transpose()
}

#[derive(Clone, Copy)]
enum Mark {
    Pending,
    Visiting,
    Done(Mat4),
}

impl Scene {
    /// World-space model matrix of every object, parents first.
    ///
    /// A parent that does not exist or that closes a cycle is ignored, so
    /// the object is composed as a root.
    pub fn model_matrices(&self) -> Vec<Mat4> {
        let mut marks = vec![Mark::Pending; self.len()];
        for index in 0..self.len() {
            self.resolve_model(index, &mut marks);
        }
        marks
            .into_iter()
            .map(|mark| match mark {
                Mark::Done(m) => m,
                Mark::Pending | Mark::Visiting => Mat4::IDENTITY,
            })
            .collect()
    }

    fn resolve_model(&self, index: usize, marks: &mut [Mark]) -> Mat4 {
        if let Mark::Done(m) = marks[index] {
            return m;
        }
        marks[index] = Mark::Visiting;

        let parent = match self.parent_index(index) {
            Some(p) if matches!(marks[p], Mark::Visiting) => {
                debug!("`{}`: parent cycle, composing as root", self.objects()[index].name);
                None
            }
            Some(p) => Some(self.resolve_model(p, marks)),
            None => None,
        };

        let object = &self.objects()[index];
        let model = object.transform.model_matrix(object.centroid, parent);
        marks[index] = Mark::Done(model);
        model
    }

    /// Camera, model and normal matrices for one frame.
    pub fn compose(&self, camera: &Camera, aspect: f32) -> FrameTransforms {
        let objects = self
            .model_matrices()
            .into_iter()
            .map(|model| ObjectTransforms {
                model,
                normal: normal_matrix(&model),
            })
            .collect();

        FrameTransforms {
            view: camera.view_matrix(),
            projection: camera.projection_matrix(aspect),
            eye: camera.position,
            objects,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::object::{Geometry, ObjectKind, SceneObject};
    use crate::transform::Transform;

    fn cube_at(name: &str, pos: Vec3) -> SceneObject {
        SceneObject::new(name, ObjectKind::Cube, Geometry::cuboid(Vec3::ZERO, Vec3::ONE))
            .with_transform(Transform::from_position(pos))
    }

    #[test]
    fn child_inherits_parent_translation() {
        let mut scene = Scene::new();
        // child listed before its parent on purpose
        scene.add(cube_at("child", Vec3::X).with_parent("parent")).unwrap();
        scene.add(cube_at("parent", Vec3::new(0.0, 5.0, 0.0))).unwrap();

        let models = scene.model_matrices();
        let child = models[0].transform_point3(Vec3::ZERO);
        assert!(child.abs_diff_eq(Vec3::new(1.0, 5.0, 0.0), 1e-6));
    }

    #[test]
    fn missing_parent_composes_as_root() {
        let mut scene = Scene::new();
        scene.add(cube_at("orphan", Vec3::Z).with_parent("nobody")).unwrap();
        let models = scene.model_matrices();
        assert!(models[0].abs_diff_eq(Mat4::from_translation(Vec3::Z), 1e-6));
    }

    #[test]
    fn cycles_terminate() {
        let mut scene = Scene::new();
        scene.add(cube_at("a", Vec3::X).with_parent("b")).unwrap();
        scene.add(cube_at("b", Vec3::Y).with_parent("a")).unwrap();
        scene.add(cube_at("c", Vec3::Z).with_parent("c")).unwrap();

        let models = scene.model_matrices();
        assert_eq!(models.len(), 3);
        assert!(models.iter().all(|m| m.is_finite()));
        assert!(models[2].abs_diff_eq(Mat4::from_translation(Vec3::Z), 1e-6));
    }

    #[test]
    fn normal_matrix_of_rotation_is_rotation() {
        let r = Mat4::from_rotation_y(0.7);
        assert!(normal_matrix(&r).abs_diff_eq(r, 1e-5));
    }

    #[test]
    fn normal_matrix_undoes_non_uniform_scale() {
        let m = Mat4::from_scale(Vec3::new(2.0, 1.0, 1.0));
        let n = normal_matrix(&m);
        assert!(n.transform_vector3(Vec3::X).abs_diff_eq(Vec3::new(0.5, 0.0, 0.0), 1e-6));
    }

    #[test]
    fn singular_model_gets_identity_normal_matrix() {
        let m = Mat4::from_scale(Vec3::new(1.0, 0.0, 1.0));
        assert_eq!(normal_matrix(&m), Mat4::IDENTITY);
    }

    #[test]
    fn compose_carries_camera() {
        let mut scene = Scene::new();
        scene.add(cube_at("a", Vec3::ZERO)).unwrap();
        let camera = Camera::default();
        let frame = scene.compose(&camera, 16.0 / 9.0);
        assert_eq!(frame.eye, camera.position);
        assert_eq!(frame.view, camera.view_matrix());
        assert_eq!(frame.objects.len(), 1);
    }
}
