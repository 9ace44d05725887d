//! # Scene Management Module
//!
//! The scene graph the engine draws each frame: a flat list of
//! [`SceneObject`]s (meshes, lines and lights) plus a background color.
//!
//! ## Key Components
//!
//! - [`Scene`] - Ordered container keyed by [`ObjectId`]
//! - [`SceneObject`] - One drawable or light with its [`Transform`]
//! - [`Light`] - Ambient, directional, point, spot and hemisphere lights
//! - [`Vertex3D`] / [`LineVertex`] - GPU vertex layouts
//!
//! ## Ownership
//!
//! Objects are moved into the scene when added and moved back out when
//! removed. Backend resources for their geometry and material are released by
//! the engine at removal time, never by the scene itself.

pub mod light;
pub mod object;
pub mod scene;
pub mod vertex;

// Re-export main types
pub use light::{Light, LightKind};
pub use object::{Drawable, ObjectId, ObjectKind, SceneObject, Transform};
pub use scene::Scene;
pub use vertex::{LineVertex, Vertex3D};
