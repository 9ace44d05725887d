use std::time::Duration;

use crate::gfx::{
    factory::{
        create_ambient_light, create_box, create_directional_light, create_plane,
        AmbientLightParams, DirectionalLightParams,
    },
    rendering::RenderBackend,
    scene::ObjectId,
    Color, SceneEngine,
};

use super::View;

/// Radians per second
const SPIN_SPEED: f32 = 0.5;

/// A single spinning box over a ground plane.
#[derive(Debug, Default)]
pub struct HomeView {
    cube: Option<ObjectId>,
}

impl HomeView {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<B: RenderBackend> View<B> for HomeView {
    fn title(&self) -> &'static str {
        "Home"
    }

    fn setup(&mut self, engine: &mut SceneEngine<B>) {
        let ground = create_plane(20.0, 20.0, Color::from_hex(0x999999))
            .with_rotation(-std::f32::consts::FRAC_PI_2, 0.0, 0.0)
            .with_name("Ground");
        engine.add_object(ground);

        let cube = create_box(2.0, 2.0, 2.0, Color::from_hex(0x44aa88))
            .with_position(0.0, 1.0, 0.0)
            .with_name("Cube");
        self.cube = Some(engine.add_object(cube));

        engine.add_object(create_ambient_light(AmbientLightParams {
            intensity: 0.4,
            ..Default::default()
        }));
        engine.add_object(create_directional_light(DirectionalLightParams {
            position: [5.0, 10.0, 7.0],
            ..Default::default()
        }));

        engine.set_camera_position(6.0, 5.0, 8.0);
        engine.look_at(0.0, 0.0, 0.0);
    }

    fn update(&mut self, engine: &mut SceneEngine<B>, dt: Duration) {
        let Some(cube) = self.cube.and_then(|id| engine.object_mut(id)) else {
            return;
        };
        cube.transform.rotation.y += SPIN_SPEED * dt.as_secs_f32();
    }

    fn ui(&mut self, ui: &imgui::Ui, _engine: &mut SceneEngine<B>) {
        ui.window("Home")
            .position([20.0, 120.0], imgui::Condition::FirstUseEver)
            .always_auto_resize(true)
            .build(|| {
                ui.text("Drag to orbit, right drag to pan, scroll to zoom.");
                ui.text("C: switch camera  D: debug axes  R: rotation  Space: pause");
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::EngineConfig, gfx::{rendering::HeadlessBackend, SurfaceSize}};

    #[test]
    fn test_cube_spins() {
        let mut engine = SceneEngine::new(HeadlessBackend::new(), EngineConfig::default());
        engine.init(&SurfaceSize::new(100, 100)).unwrap();

        let mut view = HomeView::new();
        view.setup(&mut engine);
        assert_eq!(engine.tracked_objects().len(), 4);

        view.update(&mut engine, Duration::from_secs(2));
        let cube = engine.object(view.cube.unwrap()).unwrap();
        assert!((cube.transform.rotation.y - 1.0).abs() < 1e-6);
    }
}
