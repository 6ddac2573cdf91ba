//! Error types for plexbot.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for plexbot.
#[derive(Error, Debug)]
pub enum Error {
    // Precondition errors
    #[error("The directory doesn't exist: {0}")]
    SourceNotFound(String),

    #[error("The plex TV directory doesn't exist: {0}")]
    LibraryNotFound(String),

    #[error("plex.tvpath is not configured")]
    LibraryNotConfigured,

    // File system errors
    #[error("Path not found: {0}")]
    PathNotFound(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("Copy failed: {from} -> {to}: {source}")]
    CopyFailed {
        from: String,
        to: String,
        #[source]
        source: std::io::Error,
    },

    // Config errors
    #[error("Invalid config file {path}: {message}")]
    InvalidConfig { path: String, message: String },

    // Hook errors
    #[error("Empty hook command after token substitution")]
    EmptyHookCommand,

    #[error("Failed to start hook '{command}': {source}")]
    HookSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Hook '{0}' timed out after {1}s")]
    HookTimeout(String, u64),

    #[error("Hook '{0}' exited with {1}")]
    HookFailed(String, String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // TOML errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    // YAML errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // Generic errors
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a generic error from a string.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Whether the error aborts a whole run rather than a single file.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::SourceNotFound(_) | Error::LibraryNotFound(_) | Error::LibraryNotConfigured
        )
    }
}
