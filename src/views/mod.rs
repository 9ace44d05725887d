//! # Views
//!
//! Each route shows one view. A view fills the engine's scene in
//! [`View::setup`], may animate it in [`View::update`], reacts to clicked
//! objects in [`View::on_select`] and draws its own ImGui panel in
//! [`View::ui`].

pub mod demo;
pub mod game;
pub mod home;
pub mod prime;

use std::time::Duration;

use crate::gfx::{rendering::RenderBackend, scene::ObjectId, SceneEngine};

pub use demo::DemoView;
pub use game::GameView;
pub use home::HomeView;
pub use prime::PrimeView;

pub trait View<B: RenderBackend> {
    fn title(&self) -> &'static str;

    /// Populates the scene. Called once, right after the engine is initialized.
    fn setup(&mut self, engine: &mut SceneEngine<B>);

    /// Called every frame before rendering.
    fn update(&mut self, _engine: &mut SceneEngine<B>, _dt: Duration) {}

    /// Called when the user clicks an object the view added.
    fn on_select(&mut self, _engine: &mut SceneEngine<B>, _id: ObjectId) {}

    fn ui(&mut self, _ui: &imgui::Ui, _engine: &mut SceneEngine<B>) {}
}
