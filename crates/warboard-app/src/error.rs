//! Host-side errors.

use thiserror::Error;

use warboard_core::error::CatalogueError;

/// Failures the host binary reports before or around a match.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Config(#[from] toml::de::Error),
    #[error("invalid rules: {0}")]
    InvalidRules(String),
    #[error(transparent)]
    Catalogue(#[from] CatalogueError),
    #[error("simulation already running")]
    AlreadyRunning,
    #[error("simulation not started")]
    NotStarted,
    #[error("game loop stopped")]
    LoopStopped,
}
