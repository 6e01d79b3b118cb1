//! Back-to-front draw ordering for the world objects.

use glam::{Mat4, Vec3};

use crate::scene::world::Scene;

/// Object indices sorted farthest-first by the distance from `eye` to each
/// object's world-space centroid.  Equal distances keep scene order.
///
/// `models` must be in scene order (see [`Scene::model_matrices`]).
pub fn back_to_front(scene: &Scene, models: &[Mat4], eye: Vec3) -> Vec<(usize, f32)> {
    let mut keyed: Vec<(usize, f32)> = scene
        .objects()
        .iter()
        .zip(models)
        .enumerate()
        .map(|(i, (object, model))| (i, eye.distance(object.world_centroid(model))))
        .collect();
    keyed.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    keyed
}
