use std::{fmt, str::FromStr};

use cgmath::{InnerSpace, Matrix4, Point3, SquareMatrix, Vector3};

use crate::gfx::surface::SurfaceSize;

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.5,
    0.0, 0.0, 0.0, 1.0,
);

/// Which of the engine's cameras is meant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraKind {
    Perspective,
    Orthographic,
}

impl CameraKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CameraKind::Perspective => "perspective",
            CameraKind::Orthographic => "orthographic",
        }
    }

    /// The other kind, for toggling.
    pub fn toggled(self) -> Self {
        match self {
            CameraKind::Perspective => CameraKind::Orthographic,
            CameraKind::Orthographic => CameraKind::Perspective,
        }
    }
}

impl fmt::Display for CameraKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CameraKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "perspective" => Ok(CameraKind::Perspective),
            "orthographic" => Ok(CameraKind::Orthographic),
            other => Err(format!("unknown camera kind `{other}`")),
        }
    }
}

/// Common interface of the perspective and orthographic cameras.
///
/// Cameras are Y-up and described by a position and the point they look at.
/// Projection matrices use OpenGL clip space; the renderer converts to wgpu's
/// depth range with [`OPENGL_TO_WGPU_MATRIX`].
pub trait Camera {
    fn kind(&self) -> CameraKind;

    fn position(&self) -> Vector3<f32>;

    fn set_position(&mut self, x: f32, y: f32, z: f32);

    /// The point the camera currently looks at.
    fn target(&self) -> Vector3<f32>;

    fn look_at(&mut self, x: f32, y: f32, z: f32);

    fn up(&self) -> Vector3<f32> {
        Vector3::unit_y()
    }

    fn projection_matrix(&self) -> Matrix4<f32>;

    /// Matches the projection to a surface of the given size.
    fn resize(&mut self, size: SurfaceSize);

    fn zoom(&self) -> f32 {
        1.0
    }

    /// Only orthographic cameras zoom; perspective cameras ignore this.
    fn set_zoom(&mut self, _zoom: f32) {}

    /// World units covered by one pixel at `distance` from the camera, as
    /// (horizontal, vertical).
    fn pan_scale(&self, distance: f32, viewport: SurfaceSize) -> (f32, f32);

    fn view_matrix(&self) -> Matrix4<f32> {
        view_matrix(self.position(), self.target(), self.up())
    }

    fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * self.projection_matrix() * self.view_matrix()
    }

    fn uniform(&self) -> CameraUniform {
        let eye = self.position();
        CameraUniform {
            view_position: [eye.x, eye.y, eye.z, 1.0],
            view_proj: self.build_view_projection_matrix().into(),
        }
    }
}

/// Right-handed look-at that tolerates degenerate inputs.
///
/// A target equal to the eye looks down -Z; a view direction parallel to `up`
/// borrows -Z as the up vector instead.
pub fn view_matrix(eye: Vector3<f32>, target: Vector3<f32>, up: Vector3<f32>) -> Matrix4<f32> {
    let mut direction = target - eye;
    if direction.magnitude2() < f32::EPSILON {
        direction = -Vector3::unit_z();
    }
    let up = if direction.normalize().cross(up).magnitude2() < 1e-10 {
        -Vector3::unit_z()
    } else {
        up
    };

    Matrix4::look_to_rh(Point3::new(eye.x, eye.y, eye.z), direction, up)
}

/// Right vector of a camera basis
pub fn camera_right(camera: &dyn Camera) -> Vector3<f32> {
    let view = camera.view_matrix();
    let inv = view.invert().unwrap_or_else(Matrix4::identity);
    inv.x.truncate().normalize()
}

/// Up vector of a camera basis
pub fn camera_up(camera: &dyn Camera) -> Vector3<f32> {
    let view = camera.view_matrix();
    let inv = view.invert().unwrap_or_else(Matrix4::identity);
    inv.y.truncate().normalize()
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug)]
pub struct CameraUniform {
    /// The eye position of the camera in homogenous coordinates.
    ///
    /// Homogenous coordinates are used to fullfill the 16 byte alignment requirement.
    pub view_position: [f32; 4],

    /// Contains the view projection matrix.
    pub view_proj: [[f32; 4]; 4],
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self {
            view_position: [0.0; 4],
            view_proj: Matrix4::identity().into(),
        }
    }
}
