//! Shared error types for the generator

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for contractgen operations
#[derive(Debug, Error)]
pub enum Error {
    /// File system related errors
    #[error("File system error: {message}")]
    FileSystem {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Contract manifest could not be decoded
    #[error("Manifest error in {}: {}", .file.display(), .message)]
    Manifest { file: PathBuf, message: String },

    /// Manifest file with an extension no decoder handles
    #[error("Unsupported manifest format: {}", .0.display())]
    UnsupportedManifest(PathBuf),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Template rendering errors
    #[error("Render error: {0}")]
    Render(String),

    /// Generic errors with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Formatting into an in-memory buffer failed
    #[error(transparent)]
    Fmt(#[from] std::fmt::Error),
}

impl Error {
    /// Create a file system error with path context
    pub fn file_system(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::FileSystem {
            message: message.into(),
            path: Some(path.into()),
            source: None,
        }
    }

    /// Wrap an I/O failure on a specific path
    pub fn io_at(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        Self::FileSystem {
            message: format!("{}: {}", path.display(), source),
            path: Some(path),
            source: Some(source),
        }
    }

    /// Create a manifest decoding error
    pub fn manifest(file: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Manifest {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            message: self.to_string(),
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_error_display() {
        let err = Error::manifest("contracts/chat.yaml", "missing field `name`");
        assert_eq!(
            err.to_string(),
            "Manifest error in contracts/chat.yaml: missing field `name`"
        );
    }

    #[test]
    fn test_context_wraps_message() {
        let result: Result<()> = Err(Error::Configuration("empty namespace root".into()));
        let err = result.context("Loading .contractgen.toml").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Loading .contractgen.toml: Configuration error: empty namespace root"
        );
    }

    #[test]
    fn test_io_at_keeps_path() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        match Error::io_at("out/Generated.cs", source) {
            Error::FileSystem { path, source, .. } => {
                assert_eq!(path, Some(PathBuf::from("out/Generated.cs")));
                assert!(source.is_some());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
