//! Media store configuration
//!
//! Manages settings for the filesystem media store:
//! - Allowed directories for deletion and rename (whitelist)
//! - Whether deleted files go to the system trash
//! - Whether the user must confirm each request

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::error::{MediaStoreError, Result};

/// How deleted media leaves the filesystem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeleteMode {
    /// Move to the system trash (Windows, macOS, and Linux)
    #[default]
    Trash,
    /// Remove the file outright
    Permanent,
}

/// Media store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Whitelist of directories media may be modified in.
    /// Empty list = write access not granted
    pub allowed_directories: Vec<PathBuf>,
    pub delete_mode: DeleteMode,
    /// Ask the user before deleting or renaming
    pub require_consent: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        // Start with home directory as default allowed directory
        let mut allowed = Vec::new();
        if let Some(home) = dirs::home_dir() {
            allowed.push(home);
        }
        Self {
            allowed_directories: allowed,
            delete_mode: DeleteMode::default(),
            require_consent: true,
        }
    }
}

impl StoreConfig {
    /// Configuration restricted to the given directories
    pub fn with_allowed_directories(directories: Vec<PathBuf>) -> Self {
        Self {
            allowed_directories: directories,
            ..Self::default()
        }
    }

    pub fn has_write_access(&self) -> bool {
        !self.allowed_directories.is_empty()
    }

    /// Validate that a path is within allowed directories.
    /// Returns the canonicalized path if valid
    pub fn validate_path(&self, path: &Path) -> Result<PathBuf> {
        if !self.has_write_access() {
            return Err(MediaStoreError::permission_needed(
                "Error: no directories are writable, write permission is needed to modify media",
            ));
        }

        // Canonicalize the path (resolves symlinks, .. , etc.)
        let canonical = path
            .canonicalize()
            .map_err(|e| MediaStoreError::not_found(format!("Invalid path: {}", e)))?;

        for allowed_dir in &self.allowed_directories {
            if let Ok(allowed_canonical) = allowed_dir.canonicalize() {
                if canonical.starts_with(&allowed_canonical) {
                    return Ok(canonical);
                }
            }
        }

        Err(MediaStoreError::permission_needed(format!(
            "Error: write permission is needed for '{}'",
            path.display()
        )))
    }

    /// Grant write access to a directory; returns its canonical form
    pub fn grant_directory(&mut self, path: &Path) -> Result<PathBuf> {
        let canonical = path.canonicalize().map_err(|e| {
            MediaStoreError::parameter_invalid(format!("Invalid directory: {}", e))
        })?;

        if !canonical.is_dir() {
            return Err(MediaStoreError::parameter_invalid("Path must be a directory"));
        }

        if !self.allowed_directories.contains(&canonical) {
            self.allowed_directories.push(canonical.clone());
        }
        Ok(canonical)
    }

    /// Revoke write access to a directory.
    ///
    /// Matches the path as given or canonicalized, so a directory that no
    /// longer exists can still be revoked. Returns whether anything changed.
    pub fn revoke_directory(&mut self, path: &Path) -> bool {
        let canonical = path.canonicalize().ok();
        let before = self.allowed_directories.len();
        self.allowed_directories
            .retain(|d| d != path && Some(d) != canonical.as_ref());
        self.allowed_directories.len() != before
    }
}

/// Shared, lockable configuration
pub type SharedConfig = Arc<RwLock<StoreConfig>>;

/// Global configuration instance
static CONFIG: Lazy<SharedConfig> = Lazy::new(|| Arc::new(RwLock::new(StoreConfig::default())));

pub fn shared() -> SharedConfig {
    Arc::clone(&CONFIG)
}

fn lock_error(e: impl std::fmt::Display) -> MediaStoreError {
    MediaStoreError::unexpected(format!("Config lock error: {}", e))
}

/// Snapshot of the global configuration
pub fn get_config() -> Result<StoreConfig> {
    let config = CONFIG.read().map_err(lock_error)?;
    Ok(config.clone())
}

pub fn set_delete_mode(mode: DeleteMode) -> Result<()> {
    CONFIG.write().map_err(lock_error)?.delete_mode = mode;
    Ok(())
}

pub fn set_require_consent(required: bool) -> Result<()> {
    CONFIG.write().map_err(lock_error)?.require_consent = required;
    Ok(())
}

/// Grant write access to a directory in the global configuration.
/// Returns the updated whitelist
pub fn grant_directory(path: &Path) -> Result<Vec<PathBuf>> {
    let mut config = CONFIG.write().map_err(lock_error)?;
    config.grant_directory(path)?;
    Ok(config.allowed_directories.clone())
}

/// Revoke write access to a directory in the global configuration.
/// Returns the updated whitelist
pub fn revoke_directory(path: &Path) -> Result<Vec<PathBuf>> {
    let mut config = CONFIG.write().map_err(lock_error)?;
    config.revoke_directory(path);
    Ok(config.allowed_directories.clone())
}
