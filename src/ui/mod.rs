//! # User Interface Module
//!
//! Dear ImGui overlay drawn on top of the scene.
//!
//! - [`UiManager`] - ImGui context, winit input forwarding and wgpu rendering
//! - [`engine_panel`] - Route navigation and engine controls
//!
//! Views add their own windows through [`View::ui`](crate::views::View::ui).
//! Input the UI captures never reaches the orbit controls or the picker.

pub mod manager;
pub mod panel;

pub use manager::UiManager;
pub use panel::{engine_panel, PanelAction};
