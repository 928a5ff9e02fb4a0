//! Typed error handling for deadmethod.
//!
//! Provides structured errors that library consumers can match on,
//! with full context about what went wrong and where.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for deadmethod operations.
///
/// This provides typed errors that library consumers can match on,
/// unlike opaque `anyhow::Error` types.
#[derive(Error, Debug)]
pub enum DeadmethodError {
    /// I/O error when reading files
    #[error("I/O error at {path}")]
    Io {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// No tsconfig.json in the given path or its parent
    #[error(
        "Could not find tsconfig.json in {path} or its parent. Please provide the project root or src directory."
    )]
    ManifestNotFound { path: PathBuf },

    /// The resolved source directory is not on disk
    #[error("Source directory does not exist: {path}")]
    SourceDirMissing { path: PathBuf },

    /// tsconfig.json (or a config it extends) is unreadable or invalid
    #[error("Config error at {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// Syntax or semantic error when parsing a source file
    #[error("Parse error in {path}: {message}")]
    Parse {
        path: PathBuf,
        message: String,
        /// Line number (1-indexed) if available
        line: Option<usize>,
        /// Column number (1-indexed) if available
        column: Option<usize>,
    },

    /// A reference query failed for one method
    #[error("Failed to resolve references to {class_name}.{method_name}: {message}")]
    Resolve {
        class_name: String,
        method_name: String,
        message: String,
    },

    /// Invalid argument provided
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },
}

impl DeadmethodError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Create a manifest-not-found error for the path that was searched.
    pub fn manifest_not_found(path: impl Into<PathBuf>) -> Self {
        Self::ManifestNotFound { path: path.into() }
    }

    /// Create a missing source directory error.
    pub fn source_dir_missing(path: impl Into<PathBuf>) -> Self {
        Self::SourceDirMissing { path: path.into() }
    }

    /// Create a config error.
    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a parse error without location.
    pub fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
            line: None,
            column: None,
        }
    }

    /// Create a parse error with line/column info.
    pub fn parse_at(
        path: impl Into<PathBuf>,
        message: impl Into<String>,
        line: usize,
        column: usize,
    ) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
            line: Some(line),
            column: Some(column),
        }
    }

    /// Create a resolution error for one method.
    pub fn resolve(
        class_name: impl Into<String>,
        method_name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Resolve {
            class_name: class_name.into(),
            method_name: method_name.into(),
            message: message.into(),
        }
    }

    /// Create an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Check if this error can be skipped in keep-going mode.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Parse { .. } | Self::Resolve { .. })
    }
}

/// Convenience type alias for deadmethod results.
pub type DeadmethodResult<T> = Result<T, DeadmethodError>;

/// Extension trait for converting std::io::Error with path context.
pub trait IoResultExt<T> {
    /// Add path context to an I/O error.
    fn with_path(self, path: impl Into<PathBuf>) -> DeadmethodResult<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> DeadmethodResult<T> {
        self.map_err(|e| DeadmethodError::io(path, e))
    }
}
