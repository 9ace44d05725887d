//! The seam between the scene engine and whatever draws its frames.

use thiserror::Error;

use crate::gfx::{
    camera::CameraUniform,
    geometry::GeometryId,
    resources::MaterialId,
    scene::Scene,
    surface::SurfaceSize,
    Color,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The surface was lost or outdated; it has been reconfigured and the
    /// next frame should succeed.
    #[error("render surface lost")]
    SurfaceLost,

    #[error("out of GPU memory")]
    OutOfMemory,

    #[error("timed out acquiring the next frame")]
    Timeout,

    #[error("{0}")]
    Other(String),
}

impl From<wgpu::SurfaceError> for RenderError {
    fn from(error: wgpu::SurfaceError) -> Self {
        match error {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => RenderError::SurfaceLost,
            wgpu::SurfaceError::OutOfMemory => RenderError::OutOfMemory,
            wgpu::SurfaceError::Timeout => RenderError::Timeout,
            other => RenderError::Other(other.to_string()),
        }
    }
}

/// Everything a backend needs to draw one frame
pub struct FrameContext<'a> {
    pub scene: &'a Scene,
    pub camera: CameraUniform,
    pub size: SurfaceSize,
}

/// A render target plus the GPU resources uploaded for the scene.
///
/// Geometry and material resources are created on first use inside
/// [`render`](RenderBackend::render) and live until the matching dispose call.
pub trait RenderBackend {
    fn set_background(&mut self, color: Color);

    fn resize(&mut self, size: SurfaceSize);

    fn render(&mut self, frame: &FrameContext<'_>) -> Result<(), RenderError>;

    fn dispose_geometry(&mut self, id: GeometryId);

    fn dispose_material(&mut self, id: MaterialId);
}
