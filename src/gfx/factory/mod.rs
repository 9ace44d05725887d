//! # Object and Light Factories
//!
//! Stateless constructors for ready-to-add [`SceneObject`]s. Meshes get a
//! lit standard material, lines an unlit basic material. Colors default to
//! [`DEFAULT_COLOR`].
//!
//! ```
//! use cairn::gfx::{factory::{create_box, create_point_light, PointLightParams}, Color};
//!
//! let crate_box = create_box(1.0, 1.0, 1.0, Color::from_hex(0x8b5a2b));
//! let lamp = create_point_light(PointLightParams {
//!     position: [0.0, 5.0, 0.0],
//!     ..Default::default()
//! });
//! assert!(crate_box.is_mesh());
//! assert!(lamp.as_light().is_some());
//! ```
//!
//! [`SceneObject`]: crate::gfx::scene::SceneObject

pub mod lights;
pub mod objects;

pub use lights::*;
pub use objects::*;
