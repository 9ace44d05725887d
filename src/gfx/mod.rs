//! # Graphics Module
//!
//! Everything between a scene description and pixels on the window.
//!
//! ## Architecture Overview
//!
//! - **Scene Engine** ([`engine`]) - Lifecycle wrapper owning the scene, cameras and backend
//! - **Camera System** ([`camera`]) - Perspective and orthographic cameras with orbit controls
//! - **Factories** ([`factory`]) - Ready-made primitives and lights
//! - **Scene Management** ([`scene`]) - Flat scene graph of meshes, lines and lights
//! - **Geometry** ([`geometry`]) - Procedural vertex data
//! - **Picking** ([`picking`]) - Pointer rays against scene meshes
//! - **Rendering Pipeline** ([`rendering`]) - Backend trait, wgpu renderer and headless backend
//! - **Resource Management** ([`resources`]) - Materials and GPU uniforms
//!
//! ## Usage
//!
//! ```no_run
//! use cairn::{config::EngineConfig, gfx::{engine::SceneEngine, factory, Color}};
//! # fn run(renderer: cairn::gfx::rendering::WgpuRenderer, window: &winit::window::Window) -> Result<(), cairn::error::EngineError> {
//! let mut engine = SceneEngine::new(renderer, EngineConfig::default());
//! engine.init(window)?.start();
//! engine.add_object(factory::create_box(1.0, 1.0, 1.0, Color::RED));
//! engine.set_camera_position(5.0, 5.0, 5.0);
//! # Ok(())
//! # }
//! ```

pub mod camera;
pub mod color;
pub mod engine;
pub mod factory;
pub mod frame_loop;
pub mod geometry;
pub mod picking;
pub mod rendering;
pub mod resources;
pub mod scene;
pub mod surface;

// Re-export commonly used types
pub use color::Color;
pub use engine::SceneEngine;
pub use rendering::{HeadlessBackend, RenderBackend, WgpuRenderer};
pub use surface::SurfaceSize;
