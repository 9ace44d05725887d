use crate::gfx::{
    factory::*,
    rendering::RenderBackend,
    Color, SceneEngine,
};

use super::View;

/// Every primitive and every light kind side by side.
#[derive(Debug, Default)]
pub struct DemoView;

impl DemoView {
    pub fn new() -> Self {
        Self
    }
}

impl<B: RenderBackend> View<B> for DemoView {
    fn title(&self) -> &'static str {
        "Demo"
    }

    fn setup(&mut self, engine: &mut SceneEngine<B>) {
        engine.add_object(
            create_plane(30.0, 30.0, Color::from_hex(0x808080))
                .with_rotation(-std::f32::consts::FRAC_PI_2, 0.0, 0.0)
                .with_name("Floor"),
        );

        engine.add_object(
            create_box(2.0, 2.0, 2.0, Color::from_hex(0xe74c3c))
                .with_position(-6.0, 1.0, 0.0)
                .with_name("Box"),
        );
        engine.add_object(
            create_sphere(1.2, 32, 16, Color::from_hex(0x3498db))
                .with_position(-2.0, 1.2, 0.0)
                .with_name("Sphere"),
        );
        engine.add_object(
            create_cylinder(1.0, 1.0, 2.5, 24, Color::from_hex(0x2ecc71))
                .with_position(2.0, 1.25, 0.0)
                .with_name("Cylinder"),
        );
        engine.add_object(
            create_cylinder(0.0, 1.2, 2.5, 24, Color::from_hex(0xf1c40f))
                .with_position(6.0, 1.25, 0.0)
                .with_name("Cone"),
        );

        let spiral: Vec<[f32; 3]> = (0..=120)
            .map(|i| {
                let t = i as f32 / 120.0 * std::f32::consts::TAU * 3.0;
                [t.cos() * 3.0, 0.05 + t * 0.3, t.sin() * 3.0 - 6.0]
            })
            .collect();
        engine.add_object(create_line(&spiral, Color::from_hex(0x9b59b6)).with_name("Spiral"));

        engine.add_object(create_ambient_light(AmbientLightParams {
            intensity: 0.2,
            ..Default::default()
        }));
        engine.add_object(create_hemisphere_light(HemisphereLightParams {
            sky_color: Color::from_hex(0xbfd7ff),
            ground_color: Color::from_hex(0x3a2a1a),
            intensity: 0.3,
        }));
        engine.add_object(create_directional_light(DirectionalLightParams {
            position: [-5.0, 8.0, 5.0],
            intensity: 0.6,
            ..Default::default()
        }));
        engine.add_object(create_point_light(PointLightParams {
            color: Color::from_hex(0xffaa55),
            intensity: 4.0,
            position: [0.0, 4.0, 3.0],
            distance: 20.0,
            ..Default::default()
        }));
        engine.add_object(create_spot_light(SpotLightParams {
            intensity: 3.0,
            position: [6.0, 8.0, 6.0],
            angle: 0.4,
            penumbra: 0.3,
            ..Default::default()
        }));

        engine.set_camera_position(0.0, 10.0, 18.0);
        engine.look_at(0.0, 0.0, 0.0);
    }

    fn ui(&mut self, ui: &imgui::Ui, engine: &mut SceneEngine<B>) {
        ui.window("Demo")
            .position([20.0, 120.0], imgui::Condition::FirstUseEver)
            .always_auto_resize(true)
            .build(|| {
                for object in engine.scene().objects() {
                    ui.text(format!("{} {}", object.id(), object.name));
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::EngineConfig,
        gfx::{rendering::HeadlessBackend, scene::LightKind, SurfaceSize},
    };

    #[test]
    fn test_demo_has_every_light_kind() {
        let mut engine = SceneEngine::new(HeadlessBackend::new(), EngineConfig::default());
        engine.init(&SurfaceSize::new(100, 100)).unwrap();
        DemoView::new().setup(&mut engine);

        let kinds: Vec<&str> = engine
            .scene()
            .lights()
            .map(|(_, light)| match light.kind {
                LightKind::Ambient => "ambient",
                LightKind::Directional => "directional",
                LightKind::Point { .. } => "point",
                LightKind::Spot { .. } => "spot",
                LightKind::Hemisphere { .. } => "hemisphere",
            })
            .collect();
        assert_eq!(kinds.len(), 5);
        for kind in ["ambient", "directional", "point", "spot", "hemisphere"] {
            assert!(kinds.contains(&kind), "missing {kind} light");
        }
        assert_eq!(engine.scene().objects().iter().filter(|o| o.is_mesh()).count(), 5);
    }
}
