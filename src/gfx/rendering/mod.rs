//! Core rendering functionality
//!
//! The [`RenderBackend`] trait is what the scene engine draws through.
//! [`WgpuRenderer`] implements it on a window surface; [`HeadlessBackend`]
//! implements it without a GPU.

pub mod backend;
pub mod gpu_resources;
pub mod headless;
pub mod pipeline_manager;
pub mod render_engine;

// Re-export main types
pub use backend::{FrameContext, RenderBackend, RenderError};
pub use headless::HeadlessBackend;
pub use pipeline_manager::{PipelineConfig, PipelineManager, VertexLayout};
pub use render_engine::WgpuRenderer;
