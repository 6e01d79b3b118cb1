//! Scene container: the ordered object list every system shares.
//!
//! Objects keep their insertion order for the lifetime of the scene, so a
//! [`Handle`] is just the index of the object and never goes stale.  Names
//! are unique and indexed for parent lookups.
//!
//! ```rust,ignore
//! use vista_core::{Scene, SceneObject, ObjectKind, Geometry};
//! use glam::Vec3;
//!
//! let mut scene = Scene::new();
//! let base = scene.add(SceneObject::new("base", ObjectKind::Cube, Geometry::cuboid(Vec3::ZERO, Vec3::ONE)))?;
//! let arm = scene.add(
//!     SceneObject::new("arm", ObjectKind::Cube, Geometry::cuboid(Vec3::ZERO, Vec3::ONE)).with_parent("base"),
//! )?;
//! scene.translate(base, Vec3::X); // moves `arm` too
//! ```

use std::collections::HashMap;

use glam::Vec3;
use log::warn;

use crate::color::Color;
use crate::error::SceneError;
use crate::scene::light::PointLight;
use crate::scene::object::{SceneObject, UiObject};
use crate::scene::selection::Selection;

/// Index of an object inside its [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(pub usize);

#[derive(Debug, Clone)]
pub struct Scene {
    objects: Vec<SceneObject>,
    names: HashMap<String, usize>,
    /// Clip-space overlay, drawn before the world.
    pub ui_objects: Vec<UiObject>,
    pub lights: Vec<PointLight>,
    /// Clear colour.
    pub background: Color,
    pub selection: Selection,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            names: HashMap::new(),
            ui_objects: Vec::new(),
            lights: Vec::new(),
            background: Color::GRAY,
            selection: Selection::default(),
        }
    }

    /// Appends an object.  Fails if the name is already taken.
    pub fn add(&mut self, object: SceneObject) -> Result<Handle, SceneError> {
        if self.names.contains_key(&object.name) {
            return Err(SceneError::DuplicateName(object.name));
        }
        let index = self.objects.len();
        self.names.insert(object.name.clone(), index);
        self.objects.push(object);
        Ok(Handle(index))
    }

    pub fn find(&self, name: &str) -> Option<Handle> {
        self.names.get(name).copied().map(Handle)
    }

    pub fn get(&self, handle: Handle) -> Option<&SceneObject> {
        self.objects.get(handle.0)
    }

    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut SceneObject> {
        self.objects.get_mut(handle.0)
    }

    /// Moves an object (and, through the hierarchy, its descendants).
    pub fn translate(&mut self, handle: Handle, offset: Vec3) {
        if let Some(object) = self.get_mut(handle) {
            object.transform.translate(offset);
        }
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Mutable access to every object.  Names are fixed once added, so the
    /// slice (not the `Vec`) is handed out.
    pub fn objects_mut(&mut self) -> &mut [SceneObject] {
        &mut self.objects
    }

    pub fn iter(&self) -> impl Iterator<Item = (Handle, &SceneObject)> {
        self.objects.iter().enumerate().map(|(i, o)| (Handle(i), o))
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Index of the parent of `index`, if it names an object in this scene.
    pub(crate) fn parent_index(&self, index: usize) -> Option<usize> {
        let name = self.objects.get(index)?.parent.as_deref()?;
        self.names.get(name).copied()
    }

    /// Logs parents that name no object or that close a cycle.  Both are
    /// treated as "no parent" when composing transforms.
    pub(crate) fn warn_unresolved_parents(&self) {
        for (index, object) in self.objects.iter().enumerate() {
            let Some(parent) = object.parent.as_deref() else {
                continue;
            };
            if !self.names.contains_key(parent) {
                warn!("object `{}`: parent `{}` does not exist", object.name, parent);
                continue;
            }
            // walk up at most `len` steps; coming back to `index` means a cycle
            let mut cursor = self.parent_index(index);
            for _ in 0..self.objects.len() {
                match cursor {
                    Some(i) if i == index => {
                        warn!("object `{}`: parent chain forms a cycle", object.name);
                        break;
                    }
                    Some(i) => cursor = self.parent_index(i),
                    None => break,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::object::{Geometry, ObjectKind};

    fn cube(name: &str) -> SceneObject {
        SceneObject::new(name, ObjectKind::Cube, Geometry::cuboid(Vec3::ZERO, Vec3::ONE))
    }

    #[test]
    fn add_and_find() {
        let mut scene = Scene::new();
        let a = scene.add(cube("a")).unwrap();
        let b = scene.add(cube("b").with_parent("a")).unwrap();
        assert_eq!(a, Handle(0));
        assert_eq!(b, Handle(1));
        assert_eq!(scene.find("b"), Some(b));
        assert_eq!(scene.find("missing"), None);
        assert_eq!(scene.parent_index(1), Some(0));
        assert_eq!(scene.parent_index(0), None);
    }

    #[test]
    fn duplicate_name_is_rejected() {
        let mut scene = Scene::new();
        scene.add(cube("a")).unwrap();
        assert!(matches!(scene.add(cube("a")), Err(SceneError::DuplicateName(_))));
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn translate_moves_object() {
        let mut scene = Scene::new();
        let h = scene.add(cube("a")).unwrap();
        scene.translate(h, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(scene.get(h).unwrap().transform.position, Vec3::new(1.0, 2.0, 3.0));
    }
}
