//! GPU resource management
//!
//! Materials, depth textures and the global uniform shared by every pipeline.

pub mod global_bindings;
pub mod material;
pub mod texture_resource;

// Re-export main types
pub use global_bindings::{GlobalBindings, GlobalUBO, GlobalUBOContent, LightUniform, MAX_LIGHTS};
pub use material::{Material, MaterialId, MaterialKind};
pub use texture_resource::TextureResource;
