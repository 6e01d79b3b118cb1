//! Scene objects and the geometry they carry.

use glam::{Mat4, Vec3};

use crate::color::Color;
use crate::transform::Transform;

// ─── Element kinds ─────────────────────────────────────────────────────────

/// What an object was declared as in the scene file.
///
/// Resolved once at load time; every system that cares matches on it
/// exhaustively instead of comparing strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectKind {
    /// Triangle mesh given inline in the scene file.
    Mesh,
    /// Axis-aligned box generated at load time.
    Cube,
    /// Flat quad in the XZ plane generated at load time.
    Plane,
    /// Mesh with custom shading (`"meshCustom"`).
    CustomMesh,
    /// Any other `*Custom*` type; the original tag is kept for game logic.
    Custom(String),
}

impl ObjectKind {
    /// Parse the `type` field of a scene file entry.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "mesh" => Some(Self::Mesh),
            "cube" => Some(Self::Cube),
            "plane" => Some(Self::Plane),
            "meshCustom" => Some(Self::CustomMesh),
            other if other.contains("Custom") => Some(Self::Custom(other.to_owned())),
            _ => None,
        }
    }
}

// ─── Geometry ──────────────────────────────────────────────────────────────

/// CPU copy of an object's vertex data, ready for upload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Geometry {
    pub positions: Vec<Vec3>,
    /// Per-vertex normals (same length as `positions`).
    pub normals: Vec<Vec3>,
    /// Triangle list indices.  `None` draws `positions` as a plain
    /// triangle list.
    pub indices: Option<Vec<u16>>,
}

impl Geometry {
    /// Builds geometry and derives area-weighted vertex normals.
    pub fn new(positions: Vec<Vec3>, indices: Option<Vec<u16>>) -> Self {
        let normals = vertex_normals(&positions, indices.as_deref());
        Self {
            positions,
            normals,
            indices,
        }
    }

    /// Arithmetic mean of all vertex positions.  `None` for empty geometry.
    pub fn centroid(&self) -> Option<Vec3> {
        if self.positions.is_empty() {
            return None;
        }
        let sum: Vec3 = self.positions.iter().copied().sum();
        Some(sum / self.positions.len() as f32)
    }

    /// Number of elements a draw call will consume.
    pub fn element_count(&self) -> u32 {
        match &self.indices {
            Some(indices) => indices.len() as u32,
            None => self.positions.len() as u32,
        }
    }

    /// Axis-aligned box centred on `center` with the given full `size`.
    pub fn cuboid(center: Vec3, size: Vec3) -> Self {
        let h = size * 0.5;
        let corner = |x: f32, y: f32, z: f32| center + Vec3::new(x * h.x, y * h.y, z * h.z);

        // four vertices per face so each face gets a flat normal
        #[rustfmt::skip]
        let positions = vec![
            // front  (z+)
            corner(-1.0, -1.0,  1.0), corner( 1.0, -1.0,  1.0),
            corner( 1.0,  1.0,  1.0), corner(-1.0,  1.0,  1.0),
            // back   (z-)
            corner(-1.0, -1.0, -1.0), corner( 1.0, -1.0, -1.0),
            corner( 1.0,  1.0, -1.0), corner(-1.0,  1.0, -1.0),
            // left   (x-)
            corner(-1.0, -1.0, -1.0), corner(-1.0, -1.0,  1.0),
            corner(-1.0,  1.0,  1.0), corner(-1.0,  1.0, -1.0),
            // right  (x+)
            corner( 1.0, -1.0, -1.0), corner( 1.0, -1.0,  1.0),
            corner( 1.0,  1.0,  1.0), corner( 1.0,  1.0, -1.0),
            // top    (y+)
            corner(-1.0,  1.0, -1.0), corner(-1.0,  1.0,  1.0),
            corner( 1.0,  1.0,  1.0), corner( 1.0,  1.0, -1.0),
            // bottom (y-)
            corner(-1.0, -1.0, -1.0), corner(-1.0, -1.0,  1.0),
            corner( 1.0, -1.0,  1.0), corner( 1.0, -1.0, -1.0),
        ];

        #[rustfmt::skip]
        let indices = vec![
            0,  1,  2,  2,  3,  0,  // front
            4,  6,  5,  4,  7,  6,  // back
            8,  9,  10, 8,  10, 11, // left
            12, 14, 13, 12, 15, 14, // right
            16, 17, 18, 16, 18, 19, // top
            20, 22, 21, 20, 23, 22, // bottom
        ];

        Self::new(positions, Some(indices))
    }

    /// Quad in the XZ plane facing +Y, centred on `center`.  Only the X and
    /// Z components of `size` are used.
    pub fn plane(center: Vec3, size: Vec3) -> Self {
        let h = size * 0.5;
        let positions = vec![
            center + Vec3::new(-h.x, 0.0, -h.z),
            center + Vec3::new(-h.x, 0.0, h.z),
            center + Vec3::new(h.x, 0.0, h.z),
            center + Vec3::new(h.x, 0.0, -h.z),
        ];
        Self::new(positions, Some(vec![0, 1, 2, 0, 2, 3]))
    }
}

/// Area-weighted vertex normals: every triangle adds its unnormalised face
/// normal to its three corners.
fn vertex_normals(positions: &[Vec3], indices: Option<&[u16]>) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];
    let mut accumulate = |a: usize, b: usize, c: usize| {
        let (Some(pa), Some(pb), Some(pc)) = (positions.get(a), positions.get(b), positions.get(c))
        else {
            return;
        };
        let face = (*pb - *pa).cross(*pc - *pa);
        normals[a] += face;
        normals[b] += face;
        normals[c] += face;
    };

    match indices {
        Some(indices) => {
            for tri in indices.chunks_exact(3) {
                accumulate(tri[0] as usize, tri[1] as usize, tri[2] as usize);
            }
        }
        None => {
            for start in (0..positions.len() / 3).map(|t| t * 3) {
                accumulate(start, start + 1, start + 2);
            }
        }
    }

    normals.into_iter().map(|n| n.normalize_or_zero()).collect()
}

// ─── Material ──────────────────────────────────────────────────────────────

/// Phong-style material terms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub diffuse: Color,
    pub ambient: Color,
    pub specular: Color,
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            diffuse: Color::GRAY,
            ambient: Color::rgb(0.1, 0.1, 0.1),
            specular: Color::BLACK,
            shininess: 1.0,
        }
    }
}

// ─── Objects ───────────────────────────────────────────────────────────────

/// One world-space object.
#[derive(Debug, Clone)]
pub struct SceneObject {
    /// Unique within the scene; children refer to their parent by it.
    pub name: String,
    pub kind: ObjectKind,
    pub transform: Transform,
    /// Pivot for rotation and scale, computed once from the geometry.
    pub centroid: Vec3,
    pub material: Material,
    pub geometry: Geometry,
    /// Name of the parent object, resolved every frame.
    pub parent: Option<String>,
    /// Slot in the renderer's mesh table, assigned on upload.  Applications
    /// should not touch this field.
    pub render_handle: Option<usize>,
}

impl SceneObject {
    /// Creates an object at the origin; the centroid comes from `geometry`
    /// (origin when the geometry is empty).
    pub fn new(name: impl Into<String>, kind: ObjectKind, geometry: Geometry) -> Self {
        Self {
            name: name.into(),
            kind,
            transform: Transform::default(),
            centroid: geometry.centroid().unwrap_or(Vec3::ZERO),
            material: Material::default(),
            geometry,
            parent: None,
            render_handle: None,
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// World-space centroid under a given model matrix.
    pub fn world_centroid(&self, model: &Mat4) -> Vec3 {
        model.transform_point3(self.centroid)
    }
}

/// Screen-space object: its positions are clip-space coordinates and it is
/// drawn without any camera or model transform.
#[derive(Debug, Clone)]
pub struct UiObject {
    pub name: String,
    pub geometry: Geometry,
    pub color: Color,
    pub render_handle: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_tags() {
        assert_eq!(ObjectKind::from_tag("mesh"), Some(ObjectKind::Mesh));
        assert_eq!(ObjectKind::from_tag("cube"), Some(ObjectKind::Cube));
        assert_eq!(ObjectKind::from_tag("plane"), Some(ObjectKind::Plane));
        assert_eq!(ObjectKind::from_tag("meshCustom"), Some(ObjectKind::CustomMesh));
        assert_eq!(
            ObjectKind::from_tag("cubeCustom"),
            Some(ObjectKind::Custom("cubeCustom".into()))
        );
        assert_eq!(ObjectKind::from_tag("sphere"), None);
    }

    #[test]
    fn centroid_is_vertex_mean() {
        let g = Geometry::new(
            vec![Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0), Vec3::ONE],
            None,
        );
        assert!(g.centroid().unwrap().abs_diff_eq(Vec3::new(0.5, 0.5, 0.25), 1e-6));
        assert_eq!(Geometry::default().centroid(), None);
    }

    #[test]
    fn cuboid_centroid_and_normals() {
        let g = Geometry::cuboid(Vec3::new(1.0, 2.0, 3.0), Vec3::splat(2.0));
        assert!(g.centroid().unwrap().abs_diff_eq(Vec3::new(1.0, 2.0, 3.0), 1e-6));
        assert_eq!(g.element_count(), 36);
        // top face normals point up
        for n in &g.normals[16..20] {
            assert!(n.abs_diff_eq(Vec3::Y, 1e-6));
        }
        // front face normals point toward +Z
        for n in &g.normals[0..4] {
            assert!(n.abs_diff_eq(Vec3::Z, 1e-6));
        }
    }

    #[test]
    fn plane_faces_up() {
        let g = Geometry::plane(Vec3::ZERO, Vec3::new(4.0, 1.0, 4.0));
        for n in &g.normals {
            assert!(n.abs_diff_eq(Vec3::Y, 1e-6));
        }
    }

    #[test]
    fn non_indexed_normals_use_consecutive_triples() {
        let g = Geometry::new(
            vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            None,
        );
        assert_eq!(g.element_count(), 3);
        assert!(g.normals[0].abs_diff_eq(Vec3::Z, 1e-6));
    }
}
