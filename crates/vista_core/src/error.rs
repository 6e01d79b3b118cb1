use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while turning a scene file into a
/// [`crate::Scene`].  Loading is all-or-nothing: the first error aborts.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("could not read scene file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed scene description: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("object `{name}` has unknown type `{tag}`")]
    UnknownKind { name: String, tag: String },
    #[error("object `{0}` has no vertices")]
    MissingGeometry(String),
    #[error("object `{0}` has a triangle list whose length is not a multiple of 3")]
    RaggedTriangles(String),
    #[error("object `{name}` references vertex {index} but only has {count}")]
    IndexOutOfRange {
        name: String,
        index: u32,
        count: usize,
    },
    #[error("object `{name}` has {count} vertices, more than 16-bit indices can address")]
    TooManyVertices { name: String, count: usize },
    #[error("duplicate object name `{0}`")]
    DuplicateName(String),
    #[error("camera looks nowhere: its look target is its own position")]
    DegenerateCamera,
}
