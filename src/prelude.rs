//! # Cairn Prelude
//!
//! Commonly used types for building views:
//!
//! ```
//! use cairn::prelude::*;
//!
//! let mut engine = SceneEngine::new(HeadlessBackend::new(), EngineConfig::default());
//! engine.init(&SurfaceSize::new(800, 600)).unwrap();
//! let cube = engine.add_object(create_box(1.0, 1.0, 1.0, Color::from_hex(0x44aa88)));
//! engine.remove_object(cube);
//! ```

pub use crate::{
    config::{AppConfig, EngineConfig},
    error::{EngineError, RouteError},
    gfx::{
        camera::{Camera, CameraKind},
        factory::*,
        rendering::{HeadlessBackend, RenderBackend, RenderError, WgpuRenderer},
        scene::{Light, LightKind, ObjectId, SceneObject},
        Color, SceneEngine, SurfaceSize,
    },
    routes::Route,
    utils::is_prime,
    views::View,
};
