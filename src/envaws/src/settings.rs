//! Where the shared AWS files live, and `~` expansion for their paths.

use crate::error::{EnvawsError, Result};
use dirs::home_dir;
use std::path::PathBuf;

pub const DEFAULT_CREDENTIALS_FILE: &str = "~/.aws/credentials";
pub const DEFAULT_CONFIG_FILE: &str = "~/.aws/config";

/// Locations of the shared AWS files. Paths are kept as given and expanded on use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub credentials_file: String,
    pub config_file: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            credentials_file: DEFAULT_CREDENTIALS_FILE.to_string(),
            config_file: DEFAULT_CONFIG_FILE.to_string(),
        }
    }
}

impl Settings {
    pub fn new(credentials_file: impl Into<String>, config_file: impl Into<String>) -> Self {
        Self {
            credentials_file: credentials_file.into(),
            config_file: config_file.into(),
        }
    }

    /// Expanded credentials file path.
    ///
    /// # Errors
    ///
    /// Returns [`EnvawsError::HomeNotFound`] if `~` cannot be resolved.
    pub fn credentials_path(&self) -> Result<PathBuf> {
        expand_home(&self.credentials_file)
    }

    /// Expanded config file path.
    ///
    /// # Errors
    ///
    /// Returns [`EnvawsError::HomeNotFound`] if `~` cannot be resolved.
    pub fn config_path(&self) -> Result<PathBuf> {
        expand_home(&self.config_file)
    }
}

/// Replaces a leading `~` with the user's home directory.
///
/// # Errors
///
/// Returns [`EnvawsError::HomeNotFound`] if the path starts with `~` and there is no home directory.
pub fn expand_home(path: &str) -> Result<PathBuf> {
    let rest = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => return Ok(PathBuf::from(path)),
    };

    let home = home_dir().ok_or_else(|| EnvawsError::HomeNotFound(path.to_string()))?;
    if rest.is_empty() {
        Ok(home)
    } else {
        Ok(home.join(rest))
    }
}
