pub mod layout;
pub mod world;

pub use layout::PipelineLayouts;
pub use world::{DEPTH_FORMAT, SurfacePipeline};
