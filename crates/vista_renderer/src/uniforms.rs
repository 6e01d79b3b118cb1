//! GPU-side uniform layouts.  Field order and padding mirror the structs in
//! `shaders/world.wgsl`.

use glam::Mat4;
use vista_core::{CameraPacket, Material, PointLight};

/// Lights beyond this are dropped with a warning.
pub const MAX_LIGHTS: usize = 20;

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuLight {
    pub position: [f32; 3],
    pub strength: f32,
    pub colour: [f32; 3],
    pub linear: f32,
    pub quadratic: f32,
    pub _pad: [f32; 3],
}

impl From<&PointLight> for GpuLight {
    fn from(light: &PointLight) -> Self {
        Self {
            position: light.position.to_array(),
            strength: light.strength,
            colour: light.colour.to_rgb_array(),
            linear: light.linear,
            quadratic: light.quadratic,
            _pad: [0.0; 3],
        }
    }
}

/// group(0): camera and lights, written once per frame.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub eye: [f32; 4],
    pub light_count: u32,
    pub _pad: [u32; 3],
    pub lights: [GpuLight; MAX_LIGHTS],
}

impl Default for FrameUniform {
    fn default() -> Self {
        Self {
            view: Mat4::IDENTITY.to_cols_array_2d(),
            projection: Mat4::IDENTITY.to_cols_array_2d(),
            eye: [0.0, 0.0, 0.0, 1.0],
            light_count: 0,
            _pad: [0; 3],
            lights: [GpuLight::default(); MAX_LIGHTS],
        }
    }
}

impl FrameUniform {
    pub fn new(camera: &CameraPacket, lights: &[PointLight]) -> Self {
        if lights.len() > MAX_LIGHTS {
            log::warn!("{} point lights, only the first {MAX_LIGHTS} are used", lights.len());
        }
        let mut uniform = Self {
            view: camera.view.to_cols_array_2d(),
            projection: camera.projection.to_cols_array_2d(),
            eye: camera.eye.extend(1.0).to_array(),
            ..Self::default()
        };
        for (slot, light) in uniform.lights.iter_mut().zip(lights) {
            *slot = light.into();
        }
        uniform.light_count = lights.len().min(MAX_LIGHTS) as u32;
        uniform
    }
}

/// group(1): one slot per draw in the dynamic object buffer.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    pub normal: [[f32; 4]; 4],
    pub diffuse: [f32; 4],
    pub ambient: [f32; 4],
    /// rgb specular colour, w = shininess exponent
    pub specular: [f32; 4],
}

impl ObjectUniform {
    pub fn world(model: Mat4, normal: Mat4, material: &Material) -> Self {
        let s = material.specular;
        Self {
            model: model.to_cols_array_2d(),
            normal: normal.to_cols_array_2d(),
            diffuse: material.diffuse.to_array(),
            ambient: material.ambient.to_array(),
            specular: [s.r, s.g, s.b, material.shininess],
        }
    }

    /// UI draws only read the diffuse colour.
    pub fn flat(color: vista_core::Color) -> Self {
        Self {
            model: Mat4::IDENTITY.to_cols_array_2d(),
            normal: Mat4::IDENTITY.to_cols_array_2d(),
            diffuse: color.to_array(),
            ambient: [0.0; 4],
            specular: [0.0; 4],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vista_core::glam::Vec3;
    use vista_core::Color;

    #[test]
    fn layouts_match_wgsl() {
        assert_eq!(std::mem::size_of::<GpuLight>(), 48);
        assert_eq!(std::mem::size_of::<FrameUniform>(), 160 + 48 * MAX_LIGHTS);
        assert_eq!(std::mem::size_of::<ObjectUniform>(), 176);
    }

    #[test]
    fn lights_are_capped() {
        let light = PointLight {
            position: Vec3::ONE,
            colour: Color::WHITE,
            strength: 1.0,
            linear: 0.0,
            quadratic: 0.0,
        };
        let camera = CameraPacket {
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            eye: Vec3::ZERO,
        };
        let uniform = FrameUniform::new(&camera, &vec![light; MAX_LIGHTS + 5]);
        assert_eq!(uniform.light_count, MAX_LIGHTS as u32);
        assert_eq!(uniform.lights[MAX_LIGHTS - 1].position, [1.0; 3]);
    }
}
