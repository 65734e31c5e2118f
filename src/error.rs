use thiserror::Error;

/// Main error type for scenegraph
#[derive(Error, Debug)]
pub enum SceneGraphError {
    /// Backend identifier not present in the registry
    #[error("Unknown backend: {0}")]
    UnknownBackend(String),

    /// Configuration errors (bad options, unloadable resources)
    #[error("Configuration error: {0}")]
    Config(String),

    /// File system I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The annotation provider failed for a sentence
    #[error("Annotation error: {0}")]
    Annotation(String),

    /// Annotation output violates the token/chunk contract
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// JSON (de)serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenient Result type using SceneGraphError
pub type Result<T> = std::result::Result<T, SceneGraphError>;
