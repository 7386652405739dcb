use std::io;

use thiserror::Error;

/// Library-wide error type for ddh-fetch operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Malformed client configuration file.
    #[error("Failed to parse {path}: {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// Duke Data Service API request failed.
    #[error("{message}")]
    DdsApi { message: String, status: Option<u16> },

    /// No project with the given name is visible to the configured credentials.
    #[error("Project '{0}' not found")]
    CollectionNotFound(String),

    /// The project has no file at the given path.
    #[error("File '{key}' not found in project '{collection}'")]
    ObjectNotFound { collection: String, key: String },
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    pub(crate) fn api<S: Into<String>>(message: S, status: Option<u16>) -> Self {
        AppError::DdsApi { message: message.into(), status }
    }

    /// Provide an `io::ErrorKind`-like view for callers that classify failures.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::Configuration(_) | AppError::Yaml { .. } => io::ErrorKind::InvalidInput,
            AppError::CollectionNotFound(_) | AppError::ObjectNotFound { .. } => {
                io::ErrorKind::NotFound
            }
            AppError::DdsApi { status: Some(401 | 403), .. } => io::ErrorKind::PermissionDenied,
            AppError::DdsApi { status: Some(404), .. } => io::ErrorKind::NotFound,
            AppError::DdsApi { .. } => io::ErrorKind::Other,
        }
    }
}
