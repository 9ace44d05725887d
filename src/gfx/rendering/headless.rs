use crate::gfx::{
    camera::CameraUniform,
    geometry::GeometryId,
    resources::MaterialId,
    surface::SurfaceSize,
    Color,
};

use super::backend::{FrameContext, RenderBackend, RenderError};

/// A backend that draws nothing and records what it was asked to do.
///
/// Runs the engine without a window or GPU.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    pub background: Option<Color>,
    pub size: SurfaceSize,
    pub frames: u64,
    /// Object count of the most recent frame
    pub last_object_count: usize,
    pub last_camera: Option<CameraUniform>,
    pub disposed_geometries: Vec<GeometryId>,
    pub disposed_materials: Vec<MaterialId>,
    /// Errors returned by upcoming `render` calls, in order
    pub fail_next: Vec<RenderError>,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RenderBackend for HeadlessBackend {
    fn set_background(&mut self, color: Color) {
        self.background = Some(color);
    }

    fn resize(&mut self, size: SurfaceSize) {
        self.size = size;
    }

    fn render(&mut self, frame: &FrameContext<'_>) -> Result<(), RenderError> {
        if !self.fail_next.is_empty() {
            return Err(self.fail_next.remove(0));
        }
        self.frames += 1;
        self.last_object_count = frame.scene.len();
        self.last_camera = Some(frame.camera);
        Ok(())
    }

    fn dispose_geometry(&mut self, id: GeometryId) {
        self.disposed_geometries.push(id);
    }

    fn dispose_material(&mut self, id: MaterialId) {
        self.disposed_materials.push(id);
    }
}
