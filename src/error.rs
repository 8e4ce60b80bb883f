//! Error types for TubeMind.

use thiserror::Error;

/// Library-level error type for TubeMind operations.
#[derive(Error, Debug)]
pub enum TubeMindError {
    #[error("Invalid video identifier: {0}")]
    InvalidIdentifier(String),

    #[error(
        "No captions available for video {0}. \
         Please try a video with captions enabled (look for the CC button on YouTube)."
    )]
    NoCaptionsAvailable(String),

    #[error("Embedding request failed: {0}")]
    RemoteEmbedding(String),

    #[error("Generation request failed: {0}")]
    RemoteGeneration(String),

    #[error("Video {0} not found. Please ingest it first.")]
    IndexNotBuilt(String),

    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Caption source error: {0}")]
    CaptionSource(String),

    #[error("External tool not found: {0}. Please install it and ensure it's in your PATH.")]
    ToolNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl TubeMindError {
    /// Stable machine-readable label for the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            TubeMindError::InvalidIdentifier(_) => "invalid_identifier",
            TubeMindError::NoCaptionsAvailable(_) => "no_captions_available",
            TubeMindError::RemoteEmbedding(_) => "remote_embedding_failure",
            TubeMindError::RemoteGeneration(_) => "remote_generation_failure",
            TubeMindError::IndexNotBuilt(_) => "index_not_built",
            TubeMindError::DimensionMismatch { .. } => "dimension_mismatch",
            TubeMindError::Config(_) => "config",
            TubeMindError::CaptionSource(_) => "caption_source",
            TubeMindError::ToolNotFound(_) => "tool_not_found",
            TubeMindError::InvalidInput(_) => "invalid_input",
            TubeMindError::Io(_) => "io",
            TubeMindError::Json(_) => "json",
            TubeMindError::TomlParse(_) => "toml_parse",
            TubeMindError::Http(_) => "http",
        }
    }

    /// Whether the failure came from a remote model provider.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            TubeMindError::RemoteEmbedding(_) | TubeMindError::RemoteGeneration(_)
        )
    }
}

/// Result type alias for TubeMind operations.
pub type Result<T> = std::result::Result<T, TubeMindError>;
