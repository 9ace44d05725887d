//! Error types shared across the engine, configuration and routing layers.

use std::path::PathBuf;

use thiserror::Error;

use crate::gfx::rendering::RenderError;

/// Errors raised by [`SceneEngine`](crate::gfx::engine::SceneEngine) operations.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("scene engine is already initialized")]
    AlreadyInitialized,

    #[error("render failed: {0}")]
    Render(#[from] RenderError),
}

/// Errors raised while loading an [`AppConfig`](crate::config::AppConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Errors raised while resolving a navigation path.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("no route matches `{0}`")]
    UnknownRoute(String),
}
