use vista_core::Geometry;

use crate::geometry::Vertex;
use crate::resources::buffer;

/// Vertex data of one object on the GPU.  Geometry without indices is drawn
/// as a plain triangle list.
pub struct GpuMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: Option<wgpu::Buffer>,
    /// Indices (indexed) or vertices (non-indexed) consumed by one draw.
    pub element_count: u32,
}

impl GpuMesh {
    pub fn upload(device: &wgpu::Device, label: &str, geometry: &Geometry) -> Self {
        let vertices = interleave(geometry);
        let vertex_buffer = buffer::create_vertex(device, label, &vertices);
        let index_buffer = geometry
            .indices
            .as_deref()
            .map(|indices| buffer::create_index(device, label, indices));
        Self {
            vertex_buffer,
            index_buffer,
            element_count: geometry.element_count(),
        }
    }

    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        match &self.index_buffer {
            Some(indices) => {
                rpass.set_index_buffer(indices.slice(..), wgpu::IndexFormat::Uint16);
                rpass.draw_indexed(0..self.element_count, 0, 0..1);
            }
            None => rpass.draw(0..self.element_count, 0..1),
        }
    }
}

/// Zips positions and normals; missing normals become zero.
pub fn interleave(geometry: &Geometry) -> Vec<Vertex> {
    geometry
        .positions
        .iter()
        .enumerate()
        .map(|(i, p)| Vertex {
            position: p.to_array(),
            normal: geometry.normals.get(i).map_or([0.0; 3], |n| n.to_array()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use vista_core::glam::Vec3;

    #[test]
    fn interleave_pairs_positions_with_normals() {
        let g = Geometry::new(vec![Vec3::ZERO, Vec3::X, Vec3::Y], None);
        let v = interleave(&g);
        assert_eq!(v.len(), 3);
        assert_eq!(v[1].position, [1.0, 0.0, 0.0]);
        assert_eq!(v[1].normal, [0.0, 0.0, 1.0]);
    }
}
