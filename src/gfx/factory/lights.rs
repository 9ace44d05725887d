use std::f32::consts::FRAC_PI_4;

use crate::gfx::{
    scene::{Light, LightKind, SceneObject},
    Color,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLightParams {
    pub color: Color,
    pub intensity: f32,
}

impl Default for AmbientLightParams {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            intensity: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLightParams {
    pub color: Color,
    pub intensity: f32,
    /// The light shines from here toward the origin.
    pub position: [f32; 3],
}

impl Default for DirectionalLightParams {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            intensity: 1.0,
            position: [0.0, 1.0, 0.0],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLightParams {
    pub color: Color,
    pub intensity: f32,
    pub position: [f32; 3],
    /// Range of the light; 0 means unlimited.
    pub distance: f32,
    pub decay: f32,
}

impl Default for PointLightParams {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            intensity: 1.0,
            position: [0.0, 0.0, 0.0],
            distance: 0.0,
            decay: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotLightParams {
    pub color: Color,
    pub intensity: f32,
    pub position: [f32; 3],
    /// Half-angle of the cone in radians
    pub angle: f32,
    pub penumbra: f32,
    pub decay: f32,
}

impl Default for SpotLightParams {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            intensity: 1.0,
            position: [0.0, 0.0, 0.0],
            angle: FRAC_PI_4,
            penumbra: 0.0,
            decay: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HemisphereLightParams {
    pub sky_color: Color,
    pub ground_color: Color,
    pub intensity: f32,
}

impl Default for HemisphereLightParams {
    fn default() -> Self {
        Self {
            sky_color: Color::WHITE,
            ground_color: Color::BLACK,
            intensity: 1.0,
        }
    }
}

pub fn create_ambient_light(params: AmbientLightParams) -> SceneObject {
    SceneObject::light(Light::new(LightKind::Ambient, params.color, params.intensity))
}

pub fn create_directional_light(params: DirectionalLightParams) -> SceneObject {
    let [x, y, z] = params.position;
    SceneObject::light(Light::new(
        LightKind::Directional,
        params.color,
        params.intensity,
    ))
    .with_position(x, y, z)
}

pub fn create_point_light(params: PointLightParams) -> SceneObject {
    let [x, y, z] = params.position;
    SceneObject::light(Light::new(
        LightKind::Point {
            distance: params.distance,
            decay: params.decay,
        },
        params.color,
        params.intensity,
    ))
    .with_position(x, y, z)
}

/// Spot light aimed at the origin. Its range is unlimited.
pub fn create_spot_light(params: SpotLightParams) -> SceneObject {
    let [x, y, z] = params.position;
    SceneObject::light(Light::new(
        LightKind::Spot {
            distance: 0.0,
            angle: params.angle,
            penumbra: params.penumbra,
            decay: params.decay,
        },
        params.color,
        params.intensity,
    ))
    .with_position(x, y, z)
}

/// Hemisphere light with the sky straight up.
pub fn create_hemisphere_light(params: HemisphereLightParams) -> SceneObject {
    SceneObject::light(Light::new(
        LightKind::Hemisphere {
            ground_color: params.ground_color,
        },
        params.sky_color,
        params.intensity,
    ))
    .with_position(0.0, 1.0, 0.0)
}
