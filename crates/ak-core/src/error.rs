//! Error types

/// Failure to load or save an [`AnnotationConfig`](crate::config::AnnotationConfig)
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("config file access failed: {0}")]
    Io(String),
    #[error("config could not be written as RON: {0}")]
    Serialize(String),
    #[error("config is not valid RON: {0}")]
    Deserialize(String),
}
