//! Scene description files.
//!
//! Two JSON shapes are accepted:
//!
//! * a bare array of objects (`[{ "name", "vertices", "triangles", "material" }]`)
//! * a full document with `settings`, `camera`, `pointLights`, `objects`
//!   and `uiObjects`.
//!
//! Parsing and validation happen up front; [`SceneDescription::build`]
//! either returns a complete [`Scene`] or the first error it hit.

use std::collections::HashSet;
use std::path::Path;

use glam::Vec3;
use serde::Deserialize;

use crate::color::Color;
use crate::error::SceneError;
use crate::scene::camera::{Camera, Look};
use crate::scene::light::PointLight;
use crate::scene::object::{Geometry, Material, ObjectKind, SceneObject, UiObject};
use crate::scene::world::Scene;
use crate::transform::Transform;

/// u16 indices address at most this many vertices.
const MAX_VERTICES: usize = u16::MAX as usize + 1;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SceneDescription {
    pub settings: Settings,
    pub camera: Option<CameraDescription>,
    pub point_lights: Vec<PointLight>,
    pub objects: Vec<ObjectDescription>,
    pub ui_objects: Vec<UiObjectDescription>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub background_color: Color,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            background_color: Color::GRAY,
        }
    }
}

/// Initial camera.  `front` (a direction) wins over `center` (a target)
/// when both are given; with neither the camera looks down +Z.
#[derive(Debug, Deserialize)]
pub struct CameraDescription {
    pub position: Vec3,
    #[serde(default)]
    pub front: Option<Vec3>,
    #[serde(default)]
    pub center: Option<Vec3>,
    #[serde(default = "world_up")]
    pub up: Vec3,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectDescription {
    pub name: String,
    #[serde(rename = "type", default = "mesh_tag")]
    pub kind: String,
    #[serde(default)]
    pub vertices: Vec<Vec3>,
    #[serde(default)]
    pub triangles: Option<IndexList>,
    #[serde(default)]
    pub material: MaterialDescription,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub position: Vec3,
    #[serde(default = "unit_scale")]
    pub scale: Vec3,
    /// XYZ Euler angles in degrees.
    #[serde(default)]
    pub rotation: Vec3,
}

#[derive(Debug, Deserialize)]
pub struct UiObjectDescription {
    pub name: String,
    pub vertices: Vec<Vec3>,
    #[serde(default)]
    pub triangles: Option<IndexList>,
    #[serde(default)]
    pub material: MaterialDescription,
}

/// Triangle indices, either nested (`[[0, 1, 2], ...]`) or flat.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum IndexList {
    Triangles(Vec<[u32; 3]>),
    Flat(Vec<u32>),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MaterialDescription {
    pub diffuse: Option<Color>,
    pub ambient: Option<Color>,
    pub specular: Option<Color>,
    /// Specular exponent.
    pub n: Option<f32>,
}

fn mesh_tag() -> String {
    "mesh".to_owned()
}

fn unit_scale() -> Vec3 {
    Vec3::ONE
}

fn world_up() -> Vec3 {
    Vec3::Y
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SceneFile {
    Objects(Vec<ObjectDescription>),
    Full(SceneDescription),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum UiFile {
    Objects(Vec<UiObjectDescription>),
    Wrapped {
        #[serde(rename = "uiObjects")]
        ui_objects: Vec<UiObjectDescription>,
    },
}

impl SceneDescription {
    pub fn from_json(text: &str) -> Result<Self, SceneError> {
        Ok(match serde_json::from_str(text)? {
            SceneFile::Objects(objects) => Self {
                objects,
                ..Self::default()
            },
            SceneFile::Full(desc) => desc,
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        Self::from_json(&read(path.as_ref())?)
    }

    /// Appends the screen-space objects of a separate UI file.
    pub fn load_ui(&mut self, path: impl AsRef<Path>) -> Result<(), SceneError> {
        let ui: UiFile = serde_json::from_str(&read(path.as_ref())?)?;
        match ui {
            UiFile::Objects(objects) | UiFile::Wrapped { ui_objects: objects } => {
                self.ui_objects.extend(objects)
            }
        }
        Ok(())
    }

    /// The camera declared in the file, if any.  A zero `front`, or a
    /// `center` on the eye, is rejected.
    pub fn camera(&self) -> Result<Option<Camera>, SceneError> {
        let Some(c) = &self.camera else {
            return Ok(None);
        };
        let look = match (c.front, c.center) {
            (Some(front), _) => Look::Direction(front),
            (None, Some(center)) => Look::Target(center),
            (None, None) => Look::Direction(Vec3::Z),
        };
        let camera = Camera::new(c.position, look, c.up);
        if camera.at() == Vec3::ZERO {
            return Err(SceneError::DegenerateCamera);
        }
        Ok(Some(camera))
    }

    /// Validate everything and assemble the scene.
    pub fn build(self) -> Result<Scene, SceneError> {
        let mut seen = HashSet::new();
        for object in &self.objects {
            if !seen.insert(object.name.as_str()) {
                return Err(SceneError::DuplicateName(object.name.clone()));
            }
        }

        let mut scene = Scene::new();
        scene.background = self.settings.background_color;
        scene.lights = self.point_lights;

        for desc in self.objects {
            scene.add(build_object(desc)?)?;
        }
        for desc in self.ui_objects {
            scene.ui_objects.push(build_ui_object(desc)?);
        }

        scene.warn_unresolved_parents();
        Ok(scene)
    }
}

fn read(path: &Path) -> Result<String, SceneError> {
    std::fs::read_to_string(path).map_err(|source| SceneError::Io {
        path: path.to_owned(),
        source,
    })
}

fn build_object(desc: ObjectDescription) -> Result<SceneObject, SceneError> {
    let kind = ObjectKind::from_tag(&desc.kind).ok_or_else(|| SceneError::UnknownKind {
        name: desc.name.clone(),
        tag: desc.kind.clone(),
    })?;

    let geometry = match &kind {
        ObjectKind::Cube => Geometry::cuboid(Vec3::ZERO, Vec3::ONE),
        ObjectKind::Plane => Geometry::plane(Vec3::ZERO, Vec3::ONE),
        ObjectKind::Mesh | ObjectKind::CustomMesh | ObjectKind::Custom(_) => {
            inline_geometry(&desc.name, desc.vertices, desc.triangles)?
        }
    };

    let transform = Transform::from_position(desc.position)
        .with_scale(desc.scale)
        .with_euler_degrees(desc.rotation);

    let mut object = SceneObject::new(desc.name, kind, geometry)
        .with_transform(transform)
        .with_material(desc.material.into_material());
    object.parent = desc.parent;
    Ok(object)
}

fn build_ui_object(desc: UiObjectDescription) -> Result<UiObject, SceneError> {
    let geometry = inline_geometry(&desc.name, desc.vertices, desc.triangles)?;
    Ok(UiObject {
        name: desc.name,
        geometry,
        color: desc.material.into_material().diffuse,
        render_handle: None,
    })
}

fn inline_geometry(
    name: &str,
    vertices: Vec<Vec3>,
    triangles: Option<IndexList>,
) -> Result<Geometry, SceneError> {
    if vertices.is_empty() {
        return Err(SceneError::MissingGeometry(name.to_owned()));
    }
    if vertices.len() > MAX_VERTICES {
        return Err(SceneError::TooManyVertices {
            name: name.to_owned(),
            count: vertices.len(),
        });
    }

    let indices = match triangles {
        None => {
            if vertices.len() % 3 != 0 {
                return Err(SceneError::RaggedTriangles(name.to_owned()));
            }
            None
        }
        Some(list) => {
            let flat = match list {
                IndexList::Triangles(tris) => tris.into_iter().flatten().collect(),
                IndexList::Flat(flat) => flat,
            };
            if flat.len() % 3 != 0 {
                return Err(SceneError::RaggedTriangles(name.to_owned()));
            }
            let indices = flat
                .into_iter()
                .map(|index| {
                    if (index as usize) < vertices.len() {
                        Ok(index as u16)
                    } else {
                        Err(SceneError::IndexOutOfRange {
                            name: name.to_owned(),
                            index,
                            count: vertices.len(),
                        })
                    }
                })
                .collect::<Result<Vec<_>, _>>()?;
            Some(indices)
        }
    };

    Ok(Geometry::new(vertices, indices))
}

impl MaterialDescription {
    fn into_material(self) -> Material {
        let defaults = Material::default();
        Material {
            diffuse: self.diffuse.unwrap_or(defaults.diffuse),
            ambient: self.ambient.unwrap_or(defaults.ambient),
            specular: self.specular.unwrap_or(defaults.specular),
            shininess: self.n.unwrap_or(defaults.shininess),
        }
    }
}
