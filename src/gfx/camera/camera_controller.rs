use winit::{
    dpi::PhysicalPosition,
    event::{DeviceEvent, ElementState, MouseButton, MouseScrollDelta, WindowEvent},
};

use super::{camera_utils::Camera, orbit_controls::OrbitControls};
use crate::gfx::surface::SurfaceSize;

/// Translates raw winit input into [`OrbitControls`] calls.
///
/// Left drag rotates, right drag or shift + left drag pans, the wheel dollies.
#[derive(Debug, Default)]
pub struct OrbitInput {
    is_left_pressed: bool,
    is_right_pressed: bool,
    is_shift_held: bool,
}

impl OrbitInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracks button and modifier state. Returns `true` when the event was
    /// consumed.
    pub fn process_window_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::MouseInput { state, button, .. } => {
                let pressed = *state == ElementState::Pressed;
                match button {
                    MouseButton::Left => self.is_left_pressed = pressed,
                    MouseButton::Right => self.is_right_pressed = pressed,
                    _ => return false,
                }
                true
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                self.is_shift_held = modifiers.state().shift_key();
                false
            }
            WindowEvent::Focused(false) => {
                // Release events are lost while unfocused
                self.is_left_pressed = false;
                self.is_right_pressed = false;
                false
            }
            _ => false,
        }
    }

    /// Feeds pointer motion and wheel input to `controls`. Returns `true`
    /// when the controls received input.
    pub fn process_device_event(
        &mut self,
        event: &DeviceEvent,
        controls: &mut OrbitControls,
        camera: &dyn Camera,
        viewport: SurfaceSize,
    ) -> bool {
        match event {
            DeviceEvent::MouseWheel { delta } => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => -*y,
                    MouseScrollDelta::PixelDelta(PhysicalPosition { y, .. }) => -(*y as f32),
                };
                controls.wheel(scroll);
                true
            }
            DeviceEvent::MouseMotion { delta: (dx, dy) } => {
                let (dx, dy) = (*dx as f32, *dy as f32);
                if self.is_panning() {
                    controls.pan(dx, dy, camera, viewport);
                    true
                } else if self.is_rotating() {
                    controls.rotate(dx, dy, viewport);
                    true
                } else {
                    false
                }
            }
            _ => false,
        }
    }

    pub fn is_panning(&self) -> bool {
        self.is_right_pressed || (self.is_left_pressed && self.is_shift_held)
    }

    pub fn is_rotating(&self) -> bool {
        self.is_left_pressed && !self.is_shift_held
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::{CameraKind, PerspectiveCamera};

    fn left(state: ElementState) -> WindowEvent {
        WindowEvent::MouseInput {
            device_id: winit::event::DeviceId::dummy(),
            state,
            button: MouseButton::Left,
        }
    }

    #[test]
    fn test_motion_without_button_is_ignored() {
        let mut input = OrbitInput::new();
        let mut controls = OrbitControls::new(CameraKind::Perspective);
        let camera = PerspectiveCamera::new(70.0, 1.0, 0.1, 1000.0);
        let motion = DeviceEvent::MouseMotion { delta: (10.0, 0.0) };

        assert!(!input.process_device_event(&motion, &mut controls, &camera, SurfaceSize::new(100, 100)));

        input.process_window_event(&left(ElementState::Pressed));
        assert!(input.is_rotating());
        assert!(input.process_device_event(&motion, &mut controls, &camera, SurfaceSize::new(100, 100)));

        input.process_window_event(&left(ElementState::Released));
        assert!(!input.is_rotating());
    }
}
