use cgmath::{ortho, Matrix4, Vector3};

use super::camera_utils::{Camera, CameraKind};
use crate::gfx::surface::SurfaceSize;

/// Orthographic projection camera sized by a fixed vertical frustum
///
/// The frustum spans `frustum_size` world units vertically and
/// `frustum_size * aspect` horizontally, centered on the view axis.
#[derive(Debug, Clone, PartialEq)]
pub struct OrthographicCamera {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    pub near: f32,
    pub far: f32,
    pub frustum_size: f32,
    zoom: f32,
    position: Vector3<f32>,
    target: Vector3<f32>,
}

impl OrthographicCamera {
    pub fn new(frustum_size: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            left: 0.0,
            right: 0.0,
            top: 0.0,
            bottom: 0.0,
            near,
            far,
            frustum_size,
            zoom: 1.0,
            position: Vector3::new(0.0, 0.0, 0.0),
            target: Vector3::new(0.0, 0.0, -1.0),
        };
        camera.set_aspect(aspect);
        camera
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.left = -self.frustum_size * aspect / 2.0;
        self.right = self.frustum_size * aspect / 2.0;
        self.top = self.frustum_size / 2.0;
        self.bottom = -self.frustum_size / 2.0;
    }
}

impl Camera for OrthographicCamera {
    fn kind(&self) -> CameraKind {
        CameraKind::Orthographic
    }

    fn position(&self) -> Vector3<f32> {
        self.position
    }

    fn set_position(&mut self, x: f32, y: f32, z: f32) {
        self.position = Vector3::new(x, y, z);
    }

    fn target(&self) -> Vector3<f32> {
        self.target
    }

    fn look_at(&mut self, x: f32, y: f32, z: f32) {
        self.target = Vector3::new(x, y, z);
    }

    fn projection_matrix(&self) -> Matrix4<f32> {
        let dx = (self.right - self.left) / (2.0 * self.zoom);
        let dy = (self.top - self.bottom) / (2.0 * self.zoom);
        let cx = (self.right + self.left) / 2.0;
        let cy = (self.top + self.bottom) / 2.0;

        ortho(cx - dx, cx + dx, cy - dy, cy + dy, self.near, self.far)
    }

    fn resize(&mut self, size: SurfaceSize) {
        self.set_aspect(size.aspect());
    }

    fn zoom(&self) -> f32 {
        self.zoom
    }

    fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom;
    }

    fn pan_scale(&self, _distance: f32, viewport: SurfaceSize) -> (f32, f32) {
        (
            (self.right - self.left) / self.zoom / viewport.width as f32,
            (self.top - self.bottom) / self.zoom / viewport.height as f32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frustum_follows_aspect() {
        let mut camera = OrthographicCamera::new(10.0, 1.0, 0.1, 1000.0);
        assert_eq!((camera.left, camera.right), (-5.0, 5.0));

        camera.resize(SurfaceSize::new(800, 400));
        assert_eq!((camera.left, camera.right), (-10.0, 10.0));
        assert_eq!((camera.bottom, camera.top), (-5.0, 5.0));
    }

    #[test]
    fn test_zoom_shrinks_visible_area() {
        let mut camera = OrthographicCamera::new(10.0, 1.0, 0.1, 1000.0);
        let viewport = SurfaceSize::new(100, 100);
        assert_eq!(camera.pan_scale(0.0, viewport), (0.1, 0.1));

        camera.set_zoom(2.0);
        assert_eq!(camera.pan_scale(0.0, viewport), (0.05, 0.05));
    }
}
