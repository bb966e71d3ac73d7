//! Althing error types

/// Althing error types
#[derive(Debug, thiserror::Error)]
pub enum AlthingError {
    // Upstream/network errors
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("authentication failed")]
    AuthenticationFailed,

    // Streaming errors
    #[error("stream error: {0}")]
    Stream(String),

    /// The model's final text was not a valid message array.
    #[error("failed to parse response")]
    ParseFailed,

    // Data errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Transcript has reached the hard cap; no further generation.
    #[error("conversation limit reached ({max} messages)")]
    TranscriptFull { max: usize },

    // Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("no completion provider configured")]
    NoProvider,
}

/// Result type alias for Althing operations
pub type Result<T> = std::result::Result<T, AlthingError>;
