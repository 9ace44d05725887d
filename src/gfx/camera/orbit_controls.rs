//! Orbit controls
//!
//! Orbits a camera around a target point. Input (rotate, dolly, pan) is
//! accumulated as pending deltas and applied by [`OrbitControls::update`],
//! which runs once per frame. With damping enabled only a fraction of each
//! pending delta is applied per frame, and the remainder decays
//! geometrically, giving the camera inertia.

use std::f32::consts::PI;

use cgmath::{InnerSpace, Vector3, Zero};

use super::camera_utils::{camera_right, camera_up, Camera, CameraKind};
use crate::{config::ControlsConfig, gfx::surface::SurfaceSize};

const EPS: f32 = 1e-6;

/// Spherical coordinates around the Y axis: `theta` is the azimuth measured
/// from +Z, `phi` the polar angle from +Y.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct Spherical {
    radius: f32,
    phi: f32,
    theta: f32,
}

impl Spherical {
    fn from_offset(offset: Vector3<f32>) -> Self {
        let radius = offset.magnitude();
        if radius == 0.0 {
            return Self::default();
        }
        Self {
            radius,
            theta: offset.x.atan2(offset.z),
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    fn to_offset(self) -> Vector3<f32> {
        let sin_phi_radius = self.phi.sin() * self.radius;
        Vector3::new(
            sin_phi_radius * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_radius * self.theta.cos(),
        )
    }

    /// Keeps `phi` away from the poles, where the azimuth is undefined.
    fn make_safe(&mut self) {
        self.phi = self.phi.clamp(EPS, PI - EPS);
    }
}

#[derive(Debug, Clone)]
pub struct OrbitControls {
    /// Point the camera orbits around and looks at
    pub target: Vector3<f32>,
    pub enabled: bool,
    pub enable_rotate: bool,
    pub enable_zoom: bool,
    pub enable_pan: bool,
    pub enable_damping: bool,
    pub damping_factor: f32,
    /// Pan in the camera's screen plane instead of the ground plane
    pub screen_space_panning: bool,
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,

    bound: CameraKind,
    spherical_delta: Spherical,
    pan_offset: Vector3<f32>,
    scale: f32,
    last_position: Option<Vector3<f32>>,
    last_zoom: f32,
}

impl OrbitControls {
    pub fn new(bound: CameraKind) -> Self {
        Self::from_config(&ControlsConfig::default(), bound)
    }

    pub fn from_config(config: &ControlsConfig, bound: CameraKind) -> Self {
        Self {
            target: Vector3::zero(),
            enabled: true,
            enable_rotate: true,
            enable_zoom: true,
            enable_pan: true,
            enable_damping: config.enable_damping,
            damping_factor: config.damping_factor,
            screen_space_panning: config.screen_space_panning,
            min_distance: config.min_distance,
            max_distance: config.max_distance,
            min_polar_angle: config.min_polar_angle,
            max_polar_angle: config.max_polar_angle,
            min_zoom: config.min_zoom,
            max_zoom: config.max_zoom,
            rotate_speed: config.rotate_speed,
            zoom_speed: config.zoom_speed,
            pan_speed: config.pan_speed,
            bound,
            spherical_delta: Spherical::default(),
            pan_offset: Vector3::zero(),
            scale: 1.0,
            last_position: None,
            last_zoom: 1.0,
        }
    }

    /// The camera these controls drive
    pub fn bound_camera(&self) -> CameraKind {
        self.bound
    }

    /// Rebinds to another camera. The target is kept; any pending motion is
    /// dropped so it doesn't carry over to the new camera.
    pub fn bind(&mut self, camera: CameraKind) {
        self.bound = camera;
        self.spherical_delta = Spherical::default();
        self.pan_offset = Vector3::zero();
        self.scale = 1.0;
        self.last_position = None;
    }

    /// Rotates by a pointer drag of `(dx, dy)` pixels. A drag across the full
    /// viewport height is one full turn.
    pub fn rotate(&mut self, dx: f32, dy: f32, viewport: SurfaceSize) {
        if !self.enabled || !self.enable_rotate || viewport.is_empty() {
            return;
        }
        let height = viewport.height as f32;
        self.spherical_delta.theta -= 2.0 * PI * dx / height * self.rotate_speed;
        self.spherical_delta.phi -= 2.0 * PI * dy / height * self.rotate_speed;
    }

    /// Wheel input; negative `delta_y` (scrolling up) moves closer.
    pub fn wheel(&mut self, delta_y: f32) {
        if !self.enabled || !self.enable_zoom {
            return;
        }
        if delta_y < 0.0 {
            self.dolly_in(self.zoom_scale());
        } else if delta_y > 0.0 {
            self.dolly_out(self.zoom_scale());
        }
    }

    pub fn dolly_in(&mut self, dolly_scale: f32) {
        self.scale *= dolly_scale;
    }

    pub fn dolly_out(&mut self, dolly_scale: f32) {
        self.scale /= dolly_scale;
    }

    fn zoom_scale(&self) -> f32 {
        0.95f32.powf(self.zoom_speed)
    }

    /// Pans by a pointer drag of `(dx, dy)` pixels, so that the point under
    /// the pointer follows it.
    pub fn pan(&mut self, dx: f32, dy: f32, camera: &dyn Camera, viewport: SurfaceSize) {
        if !self.enabled || !self.enable_pan || viewport.is_empty() {
            return;
        }

        let distance = (camera.position() - self.target).magnitude();
        let (scale_x, scale_y) = camera.pan_scale(distance, viewport);

        let right = camera_right(camera);
        self.pan_offset -= right * (dx * scale_x * self.pan_speed);

        let up = if self.screen_space_panning {
            camera_up(camera)
        } else {
            // Forward direction projected onto the ground plane
            camera.up().cross(right)
        };
        self.pan_offset += up * (dy * scale_y * self.pan_speed);
    }

    /// Applies pending input to `camera`. Returns `true` when the camera moved
    /// or zoomed.
    pub fn update(&mut self, camera: &mut dyn Camera) -> bool {
        let offset = camera.position() - self.target;
        let mut spherical = Spherical::from_offset(offset);

        let factor = if self.enable_damping {
            self.damping_factor
        } else {
            1.0
        };

        spherical.theta += self.spherical_delta.theta * factor;
        spherical.phi += self.spherical_delta.phi * factor;
        spherical.phi = spherical
            .phi
            .clamp(self.min_polar_angle, self.max_polar_angle.max(self.min_polar_angle));
        spherical.make_safe();

        match camera.kind() {
            CameraKind::Perspective => spherical.radius *= self.scale,
            CameraKind::Orthographic => {
                let zoom = (camera.zoom() / self.scale).clamp(self.min_zoom, self.max_zoom);
                camera.set_zoom(zoom);
            }
        }
        spherical.radius = spherical
            .radius
            .clamp(self.min_distance, self.max_distance.max(self.min_distance));

        self.target += self.pan_offset * factor;

        let position = self.target + spherical.to_offset();
        camera.set_position(position.x, position.y, position.z);
        camera.look_at(self.target.x, self.target.y, self.target.z);

        if self.enable_damping {
            self.spherical_delta.theta *= 1.0 - self.damping_factor;
            self.spherical_delta.phi *= 1.0 - self.damping_factor;
            self.pan_offset *= 1.0 - self.damping_factor;
        } else {
            self.spherical_delta = Spherical::default();
            self.pan_offset = Vector3::zero();
        }
        self.scale = 1.0;

        let zoom_changed = (camera.zoom() - self.last_zoom).abs() > EPS;
        let moved = self
            .last_position
            .map_or(true, |last| (last - position).magnitude2() > EPS);
        self.last_position = Some(position);
        self.last_zoom = camera.zoom();

        moved || zoom_changed
    }
}
