pub mod camera_controller;
pub mod camera_utils;
pub mod orbit_controls;
pub mod orthographic;
pub mod perspective;

pub use camera_controller::OrbitInput;
pub use camera_utils::{Camera, CameraKind, CameraUniform, OPENGL_TO_WGPU_MATRIX};
pub use orbit_controls::OrbitControls;
pub use orthographic::OrthographicCamera;
pub use perspective::PerspectiveCamera;
