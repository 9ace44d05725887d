//! Cairn 3D Scene Engine
//!
//! A small scene engine built on wgpu and winit: meshes, lines and lights,
//! perspective and orthographic cameras driven by orbit controls, pointer
//! picking, and a router that switches between views.

pub mod app;
pub mod config;
pub mod error;
pub mod gfx;
pub mod prelude;
pub mod routes;
pub mod ui;
pub mod utils;
pub mod views;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::CairnApp;
pub use config::AppConfig;
pub use routes::Route;

/// Creates an application with the default configuration showing `/home`.
pub fn default() -> anyhow::Result<CairnApp> {
    CairnApp::new(AppConfig::default(), Route::Home)
}
