//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Key-value store failure
    #[error("Storage error in '{store}': {message}")]
    Storage { store: String, message: String },

    /// Image could not be loaded or decoded
    #[error("Image error for '{source_path}': {message}")]
    Image {
        source_path: String,
        message: String,
    },

    /// Record worker stopped or unresponsive
    #[error("Record worker stopped")]
    RecorderStopped,

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a storage error
    pub fn storage(store: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::Storage {
            store: store.into(),
            message: message.into(),
        }
    }

    /// Create an image error
    pub fn image(source_path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::Image {
            source_path: source_path.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }
}

#[cfg(feature = "sled-store")]
impl From<sled::Error> for LoggerError {
    fn from(err: sled::Error) -> Self {
        LoggerError::storage("sled", err.to_string())
    }
}
