pub mod buffer;
pub mod object_buffer;

pub use object_buffer::ObjectBuffer;
