use rand::{rngs::StdRng, Rng, SeedableRng};

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

const WAVE_SIZE: usize = 8;
const FIELD_HALF_EXTENT: f32 = 8.0;

/// Click the boxes to clear them. Each cleared wave spawns a bigger one.
#[derive(Debug)]
pub struct GameView {
    rng: StdRng,
    targets: Vec<ObjectId>,
    score: u32,
    wave: u32,
}

impl GameView {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_rng(&mut rand::rng()))
    }

    /// Deterministic target placement
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng,
            targets: Vec::new(),
            score: 0,
            wave: 0,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn wave(&self) -> u32 {
        self.wave
    }

    pub fn targets(&self) -> &[ObjectId] {
        &self.targets
    }

    fn spawn_wave<B: RenderBackend>(&mut self, engine: &mut SceneEngine<B>) {
        self.wave += 1;
        let count = WAVE_SIZE + (self.wave as usize - 1) * 2;
        for i in 0..count {
            let size = self.rng.random_range(0.5..1.5);
            let x = self.rng.random_range(-FIELD_HALF_EXTENT..FIELD_HALF_EXTENT);
            let z = self.rng.random_range(-FIELD_HALF_EXTENT..FIELD_HALF_EXTENT);
            let color = Color::rgb(
                self.rng.random_range(0.2..1.0),
                self.rng.random_range(0.2..1.0),
                self.rng.random_range(0.2..1.0),
            );
            let target = create_box(size, size, size, color)
                .with_position(x, size * 0.5, z)
                .with_rotation(0.0, self.rng.random_range(0.0..std::f32::consts::TAU), 0.0)
                .with_name(format!("Target {}-{}", self.wave, i));
            self.targets.push(engine.add_object(target));
        }
        log::info!("Wave {} spawned with {} targets", self.wave, count);
    }
}

impl Default for GameView {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: RenderBackend> View<B> for GameView {
    fn title(&self) -> &'static str {
        "Game"
    }

    fn setup(&mut self, engine: &mut SceneEngine<B>) {
        engine.set_background(Color::from_hex(0x1d2331));
        engine.add_object(
            create_plane(2.0 * FIELD_HALF_EXTENT + 4.0, 2.0 * FIELD_HALF_EXTENT + 4.0, Color::from_hex(0x2f3b4f))
                .with_rotation(-std::f32::consts::FRAC_PI_2, 0.0, 0.0)
                .with_name("Arena"),
        );
        engine.add_object(create_ambient_light(AmbientLightParams {
            intensity: 0.35,
            ..Default::default()
        }));
        engine.add_object(create_directional_light(DirectionalLightParams {
            position: [4.0, 10.0, 6.0],
            ..Default::default()
        }));

        self.targets.clear();
        self.score = 0;
        self.wave = 0;
        self.spawn_wave(engine);

        engine.set_camera_position(0.0, 14.0, 14.0);
        engine.look_at(0.0, 0.0, 0.0);
    }

    fn on_select(&mut self, engine: &mut SceneEngine<B>, id: ObjectId) {
        let Some(index) = self.targets.iter().position(|target| *target == id) else {
            return;
        };
        self.targets.swap_remove(index);
        engine.remove_object(id);
        self.score += 1;

        if self.targets.is_empty() {
            self.spawn_wave(engine);
        }
    }

    fn ui(&mut self, ui: &imgui::Ui, _engine: &mut SceneEngine<B>) {
        ui.window("Game")
            .position([20.0, 120.0], imgui::Condition::FirstUseEver)
            .always_auto_resize(true)
            .build(|| {
                ui.text(format!("Score: {}", self.score));
                ui.text(format!("Wave: {}", self.wave));
                ui.text(format!("Targets left: {}", self.targets.len()));
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::EngineConfig, gfx::{rendering::HeadlessBackend, SurfaceSize}};

    fn engine() -> SceneEngine<HeadlessBackend> {
        let mut engine = SceneEngine::new(HeadlessBackend::new(), EngineConfig::default());
        engine.init(&SurfaceSize::new(640, 480)).unwrap();
        engine
    }

    #[test]
    fn test_selecting_target_scores() {
        let mut engine = engine();
        let mut game = GameView::with_seed(7);
        game.setup(&mut engine);
        assert_eq!(game.targets().len(), WAVE_SIZE);

        let target = game.targets()[0];
        game.on_select(&mut engine, target);
        assert_eq!(game.score(), 1);
        assert!(engine.object(target).is_none());
        assert_eq!(engine.backend().disposed_geometries.len(), 1);
    }

    #[test]
    fn test_non_target_selection_is_ignored() {
        let mut engine = engine();
        let mut game = GameView::with_seed(7);
        game.setup(&mut engine);

        let arena = engine.tracked_objects()[0];
        game.on_select(&mut engine, arena);
        assert_eq!(game.score(), 0);
        assert!(engine.object(arena).is_some());
    }

    #[test]
    fn test_clearing_wave_spawns_next() {
        let mut engine = engine();
        let mut game = GameView::with_seed(1);
        game.setup(&mut engine);

        for target in game.targets().to_vec() {
            game.on_select(&mut engine, target);
        }
        assert_eq!(game.score(), WAVE_SIZE as u32);
        assert_eq!(game.wave(), 2);
        assert_eq!(game.targets().len(), WAVE_SIZE + 2);
    }

    #[test]
    fn test_seeded_waves_match() {
        let (mut a, mut b) = (engine(), engine());
        let (mut first, mut second) = (GameView::with_seed(42), GameView::with_seed(42));
        first.setup(&mut a);
        second.setup(&mut b);

        let positions = |engine: &SceneEngine<HeadlessBackend>, game: &GameView| {
            game.targets()
                .iter()
                .map(|id| engine.object(*id).unwrap().position())
                .collect::<Vec<_>>()
        };
        assert_eq!(positions(&a, &first), positions(&b, &second));
    }
}
