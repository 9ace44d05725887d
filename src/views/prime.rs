use crate::{
    gfx::{
        factory::{
            create_ambient_light, create_directional_light, create_sphere, AmbientLightParams,
            DirectionalLightParams,
        },
        rendering::RenderBackend,
        scene::ObjectId,
        Color, SceneEngine,
    },
    utils::is_prime,
};

use super::View;

const PRIME_COLOR: Color = Color::rgb(0.2, 0.8, 0.3);
const COMPOSITE_COLOR: Color = Color::rgb(0.85, 0.25, 0.2);

/// Primality checker. The sphere turns green for primes and red otherwise.
#[derive(Debug)]
pub struct PrimeView {
    input: i64,
    verdict: Option<(i64, bool)>,
    indicator: Option<ObjectId>,
}

impl PrimeView {
    pub fn new() -> Self {
        Self {
            input: 2,
            verdict: None,
            indicator: None,
        }
    }

    /// Checks `n` and recolors the indicator sphere.
    pub fn check<B: RenderBackend>(&mut self, engine: &mut SceneEngine<B>, n: i64) -> bool {
        let prime = is_prime(n);
        self.verdict = Some((n, prime));
        log::info!("{} is {}", n, if prime { "prime" } else { "not prime" });

        let indicator = self
            .indicator
            .and_then(|id| engine.object_mut(id))
            .and_then(|object| object.drawable_mut());
        if let Some(drawable) = indicator {
            drawable.material.color = if prime { PRIME_COLOR } else { COMPOSITE_COLOR };
        }
        prime
    }

    pub fn verdict(&self) -> Option<(i64, bool)> {
        self.verdict
    }
}

impl Default for PrimeView {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: RenderBackend> View<B> for PrimeView {
    fn title(&self) -> &'static str {
        "Prime"
    }

    fn setup(&mut self, engine: &mut SceneEngine<B>) {
        let sphere = create_sphere(1.5, 48, 24, Color::from_hex(0xcccccc)).with_name("Indicator");
        self.indicator = Some(engine.add_object(sphere));
        engine.add_object(create_ambient_light(AmbientLightParams {
            intensity: 0.4,
            ..Default::default()
        }));
        engine.add_object(create_directional_light(DirectionalLightParams {
            position: [3.0, 5.0, 4.0],
            ..Default::default()
        }));
        engine.set_camera_position(0.0, 0.0, 6.0);
        engine.look_at(0.0, 0.0, 0.0);
        self.verdict = None;
    }

    fn ui(&mut self, ui: &imgui::Ui, engine: &mut SceneEngine<B>) {
        let mut submitted = false;
        ui.window("Prime")
            .position([20.0, 120.0], imgui::Condition::FirstUseEver)
            .always_auto_resize(true)
            .build(|| {
                submitted |= ui
                    .input_scalar("Number", &mut self.input)
                    .enter_returns_true(true)
                    .build();
                submitted |= ui.button("Check");

                match self.verdict {
                    Some((n, true)) => ui.text_colored([0.2, 0.8, 0.3, 1.0], format!("{n} is prime")),
                    Some((n, false)) => {
                        ui.text_colored([0.85, 0.25, 0.2, 1.0], format!("{n} is not prime"))
                    }
                    None => ui.text("Enter a number"),
                }
            });
        if submitted {
            self.check(engine, self.input);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::EngineConfig, gfx::{rendering::HeadlessBackend, SurfaceSize}};

    #[test]
    fn test_check_recolors_indicator() {
        let mut engine = SceneEngine::new(HeadlessBackend::new(), EngineConfig::default());
        engine.init(&SurfaceSize::new(100, 100)).unwrap();
        let mut view = PrimeView::new();
        view.setup(&mut engine);
        let indicator = view.indicator.unwrap();
        let color = |engine: &SceneEngine<HeadlessBackend>| {
            engine.object(indicator).unwrap().drawable().unwrap().material.color
        };

        assert!(view.check(&mut engine, 97));
        assert_eq!(view.verdict(), Some((97, true)));
        assert_eq!(color(&engine), PRIME_COLOR);

        assert!(!view.check(&mut engine, 91));
        assert_eq!(color(&engine), COMPOSITE_COLOR);
    }
}
