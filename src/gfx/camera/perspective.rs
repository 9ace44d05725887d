use cgmath::{perspective, Deg, Matrix4, Vector3};

use super::camera_utils::{Camera, CameraKind};
use crate::gfx::surface::SurfaceSize;

/// Perspective projection camera
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Width over height, kept equal to the surface's aspect ratio
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    position: Vector3<f32>,
    target: Vector3<f32>,
}

impl PerspectiveCamera {
    pub fn new(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            fov,
            aspect,
            near,
            far,
            position: Vector3::new(0.0, 0.0, 0.0),
            target: Vector3::new(0.0, 0.0, -1.0),
        }
    }
}

impl Camera for PerspectiveCamera {
    fn kind(&self) -> CameraKind {
        CameraKind::Perspective
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
        perspective(Deg(self.fov), self.aspect, self.near, self.far)
    }

    fn resize(&mut self, size: SurfaceSize) {
        self.aspect = size.aspect();
    }

    fn pan_scale(&self, distance: f32, viewport: SurfaceSize) -> (f32, f32) {
        // Half the visible height at the target distance
        let half_height = distance * (self.fov.to_radians() / 2.0).tan();
        let per_pixel = 2.0 * half_height / viewport.height as f32;
        (per_pixel, per_pixel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resize_sets_aspect() {
        let mut camera = PerspectiveCamera::new(70.0, 1.0, 0.1, 1000.0);
        camera.resize(SurfaceSize::new(1920, 1080));
        assert_eq!(camera.aspect, 1920.0 / 1080.0);
    }

    #[test]
    fn test_zoom_is_fixed() {
        let mut camera = PerspectiveCamera::new(70.0, 1.0, 0.1, 1000.0);
        camera.set_zoom(3.0);
        assert_eq!(camera.zoom(), 1.0);
    }

    #[test]
    fn test_pan_scale_grows_with_distance() {
        let camera = PerspectiveCamera::new(90.0, 1.0, 0.1, 1000.0);
        let viewport = SurfaceSize::new(100, 100);
        let (near_x, _) = camera.pan_scale(1.0, viewport);
        let (far_x, far_y) = camera.pan_scale(10.0, viewport);
        assert!((near_x - 0.02).abs() < 1e-5);
        assert!((far_x - 0.2).abs() < 1e-4);
        assert_eq!(far_x, far_y);
    }
}
