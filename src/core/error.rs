//! Error types for the Tundra core

use thiserror::Error;

use crate::mesh::MeshError;

/// Main error type for the crate
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Mesh error: {0}")]
    Mesh(#[from] MeshError),
}
