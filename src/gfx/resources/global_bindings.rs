//! Global uniform bindings for camera and scene data
//!
//! One uniform buffer holds the camera and every visible light of the frame.
//! It is bound to slot 0 of every pipeline.

use cgmath::{InnerSpace, Vector3};

use crate::{
    gfx::{
        camera::CameraUniform,
        scene::{Light, LightKind, SceneObject},
    },
    wgpu_utils::{
        binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
        binding_types,
        uniform_buffer::UniformBuffer,
    },
};

/// Lights beyond this count are ignored by the shaders.
pub const MAX_LIGHTS: usize = 8;

const KIND_AMBIENT: f32 = 0.0;
const KIND_DIRECTIONAL: f32 = 1.0;
const KIND_POINT: f32 = 2.0;
const KIND_SPOT: f32 = 3.0;
const KIND_HEMISPHERE: f32 = 4.0;

/// One light as seen by the shaders. MUST match `Light` in the WGSL sources.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    /// xyz: world position, w: light kind
    pub position: [f32; 4],
    /// xyz: unit vector from the lit surface toward the light
    pub direction: [f32; 4],
    /// rgb premultiplied by intensity
    pub color: [f32; 4],
    /// Hemisphere lights only
    pub ground_color: [f32; 4],
    /// distance, decay, cos(angle), cos(angle * (1 - penumbra))
    pub params: [f32; 4],
}

impl LightUniform {
    pub fn new(light: &Light, position: Vector3<f32>) -> Self {
        let direction = if position.magnitude2() > 0.0 {
            position.normalize()
        } else {
            Vector3::unit_y()
        };
        let color = light.color.to_array().map(|c| c * light.intensity);

        let (kind, ground_color, params) = match light.kind {
            LightKind::Ambient => (KIND_AMBIENT, [0.0; 3], [0.0; 4]),
            LightKind::Directional => (KIND_DIRECTIONAL, [0.0; 3], [0.0; 4]),
            LightKind::Point { distance, decay } => {
                (KIND_POINT, [0.0; 3], [distance, decay, 0.0, 0.0])
            }
            LightKind::Spot {
                distance,
                angle,
                penumbra,
                decay,
            } => (
                KIND_SPOT,
                [0.0; 3],
                [distance, decay, angle.cos(), (angle * (1.0 - penumbra)).cos()],
            ),
            LightKind::Hemisphere { ground_color } => (
                KIND_HEMISPHERE,
                ground_color.to_array().map(|c| c * light.intensity),
                [0.0; 4],
            ),
        };

        Self {
            position: [position.x, position.y, position.z, kind],
            direction: [direction.x, direction.y, direction.z, 0.0],
            color: [color[0], color[1], color[2], 1.0],
            ground_color: [ground_color[0], ground_color[1], ground_color[2], 1.0],
            params,
        }
    }
}

/// Global uniform buffer content. MUST match `Globals` in the WGSL sources.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUBOContent {
    view_position: [f32; 4],
    view_proj: [[f32; 4]; 4],
    lights: [LightUniform; MAX_LIGHTS],
    /// x: number of lights in use
    light_count: [u32; 4],
}

impl GlobalUBOContent {
    /// Packs the camera and up to [`MAX_LIGHTS`] lights.
    pub fn new<'a>(
        camera: CameraUniform,
        lights: impl IntoIterator<Item = (&'a SceneObject, &'a Light)>,
    ) -> Self {
        let mut content = Self {
            view_position: camera.view_position,
            view_proj: camera.view_proj,
            lights: [LightUniform::default(); MAX_LIGHTS],
            light_count: [0; 4],
        };

        let mut count = 0;
        for (object, light) in lights.into_iter() {
            if count == MAX_LIGHTS {
                log::warn!("More than {MAX_LIGHTS} lights in the scene, extra lights ignored");
                break;
            }
            content.lights[count] = LightUniform::new(light, object.position());
            count += 1;
        }
        content.light_count[0] = count as u32;
        content
    }

    pub fn light_count(&self) -> usize {
        self.light_count[0] as usize
    }

    pub fn light(&self, index: usize) -> Option<&LightUniform> {
        self.lights[..self.light_count()].get(index)
    }
}

/// Type alias for the global uniform buffer
pub type GlobalUBO = UniformBuffer<GlobalUBOContent>;

/// Bind group layout and bind group for the global uniform.
pub struct GlobalBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
    bind_group: wgpu::BindGroup,
}

impl GlobalBindings {
    pub fn new(device: &wgpu::Device, ubo: &GlobalUBO) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_rendering(binding_types::uniform())
            .create(device, "Globals Bind Group");

        let bind_group = BindGroupBuilder::new(&bind_group_layout)
            .resource(ubo.binding_resource())
            .create(device, "Global Bind Group");

        GlobalBindings {
            bind_group_layout,
            bind_group,
        }
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::Color;

    fn light_at(kind: LightKind, x: f32, y: f32, z: f32) -> SceneObject {
        SceneObject::light(Light::new(kind, Color::WHITE, 2.0)).with_position(x, y, z)
    }

    #[test]
    fn test_uniform_layout_is_16_byte_aligned() {
        assert_eq!(std::mem::size_of::<LightUniform>() % 16, 0);
        assert_eq!(std::mem::size_of::<GlobalUBOContent>() % 16, 0);
    }

    #[test]
    fn test_light_packing() {
        let objects = [
            light_at(LightKind::Directional, 0.0, 10.0, 0.0),
            light_at(
                LightKind::Spot {
                    distance: 0.0,
                    angle: std::f32::consts::FRAC_PI_4,
                    penumbra: 0.0,
                    decay: 1.0,
                },
                3.0,
                0.0,
                4.0,
            ),
        ];
        let lights = objects
            .iter()
            .map(|object| (object, object.as_light().unwrap()));
        let content = GlobalUBOContent::new(CameraUniform::default(), lights);

        assert_eq!(content.light_count(), 2);
        let directional = content.light(0).unwrap();
        assert_eq!(directional.direction[..3], [0.0, 1.0, 0.0]);
        assert_eq!(directional.color[..3], [2.0, 2.0, 2.0]);

        let spot = content.light(1).unwrap();
        assert_eq!(spot.position[3], KIND_SPOT);
        assert!((spot.direction[0] - 0.6).abs() < 1e-6);
        assert!((spot.params[2] - spot.params[3]).abs() < 1e-6);
    }

    #[test]
    fn test_extra_lights_are_dropped() {
        let objects: Vec<_> = (0..MAX_LIGHTS + 3)
            .map(|_| light_at(LightKind::Ambient, 0.0, 0.0, 0.0))
            .collect();
        let lights = objects
            .iter()
            .map(|object| (object, object.as_light().unwrap()));
        let content = GlobalUBOContent::new(CameraUniform::default(), lights);
        assert_eq!(content.light_count(), MAX_LIGHTS);
        assert!(content.light(MAX_LIGHTS).is_none());
    }
}
