//! Error types for envaws.

use thiserror::Error;

/// Errors that can occur while loading profiles or talking to AWS.
#[derive(Error, Debug)]
pub enum EnvawsError {
    /// The home directory could not be resolved while expanding `~`.
    #[error("doesn't exist: cannot resolve home directory for {0}")]
    HomeNotFound(String),

    /// The profile file could not be opened or read.
    #[error("failed to open {0}: {1}")]
    FileRead(String, std::io::Error),

    /// The profile file is not valid INI.
    #[error("failed to parse {0}: {1}")]
    Parse(String, ini::ParseError),

    /// No section with the requested name exists.
    #[error("missing {profile} in {path}")]
    MissingProfile { profile: String, path: String },

    /// A required credential key is absent or empty.
    #[error("{key} is empty in profile {profile}")]
    EmptyKey { key: &'static str, profile: String },

    /// Unknown Terraform output format.
    #[error("not supported format: {0}")]
    UnsupportedFormat(String),

    /// An AWS API call failed.
    #[error("{0}")]
    Aws(String),
}

impl EnvawsError {
    /// Whether this error means the file itself does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, EnvawsError::FileRead(_, e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}

/// Result type for envaws operations.
pub type Result<T> = std::result::Result<T, EnvawsError>;
