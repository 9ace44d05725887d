//! Light sources.
//!
//! Lights carry color, intensity and kind-specific parameters. Their position
//! comes from the owning [`SceneObject`](super::SceneObject)'s transform;
//! directional and spot lights aim at the world origin.

use crate::gfx::Color;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    /// Uniform light from every direction.
    Ambient,
    /// Parallel rays travelling from the light position toward the origin.
    Directional,
    /// Omnidirectional light. A `distance` of 0 means unlimited range.
    Point { distance: f32, decay: f32 },
    /// Cone of light aimed at the origin. `angle` is the half-angle in radians,
    /// `penumbra` the fraction of the cone that fades out.
    Spot {
        distance: f32,
        angle: f32,
        penumbra: f32,
        decay: f32,
    },
    /// Sky color from above blending into `ground_color` from below.
    Hemisphere { ground_color: Color },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub color: Color,
    pub intensity: f32,
    pub kind: LightKind,
}

impl Light {
    pub fn new(kind: LightKind, color: Color, intensity: f32) -> Self {
        Self {
            color,
            intensity,
            kind,
        }
    }

    pub fn name(&self) -> &'static str {
        match self.kind {
            LightKind::Ambient => "AmbientLight",
            LightKind::Directional => "DirectionalLight",
            LightKind::Point { .. } => "PointLight",
            LightKind::Spot { .. } => "SpotLight",
            LightKind::Hemisphere { .. } => "HemisphereLight",
        }
    }
}
