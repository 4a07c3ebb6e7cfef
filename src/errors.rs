use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NavgraphError {
    // Geometry errors
    #[error("Degenerate geometry: {reason}")]
    DegenerateGeometry { reason: String },

    // Source decoding errors
    #[error("Failed to decode obstacle source '{source_id}': {reason}")]
    DecodeFailure { source_id: String, reason: String },

    // Configuration errors
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("Unsupported output path {path:?}: only .json artifacts are supported")]
    UnsupportedOutputPath { path: PathBuf },

    #[error("Failed to parse config: {0}")]
    ConfigParseFailed(#[from] toml::de::Error),

    // Artifact errors
    #[error("Failed to serialize graph artifact: {0}")]
    ArtifactSerializationFailed(#[from] serde_json::Error),

    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for all operations
pub type NavgraphResult<T> = Result<T, NavgraphError>;
