//! Media error types.

/// Errors from audio-note storage. An upload failure never blocks a
/// registration; callers downgrade it to a warning.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    /// The object store rejected the operation.
    #[error("object storage error: {0}")]
    ObjectStore(#[from] object_store::Error),

    /// Storage settings are missing or unusable.
    #[error(transparent)]
    Config(#[from] survey_config::ConfigError),

    /// File extension is not one of the accepted audio formats.
    #[error("unsupported audio format '{0}' (expected mp3, wav, or m4a)")]
    UnsupportedFormat(String),

    /// The audio payload was empty.
    #[error("audio note is empty")]
    Empty,

    /// I/O error reading the audio file or preparing the local directory.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
