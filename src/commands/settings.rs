//! Settings-related Tauri commands
//!
//! Adjust the process-wide configuration read by the filesystem media store.

use std::path::PathBuf;

use crate::config::{self, DeleteMode, StoreConfig};
use crate::error::MediaStoreError;

#[tauri::command]
pub fn get_store_config() -> Result<StoreConfig, MediaStoreError> {
    config::get_config()
}

#[tauri::command]
pub fn add_allowed_directory(path: String) -> Result<Vec<PathBuf>, MediaStoreError> {
    config::grant_directory(&PathBuf::from(path))
}

#[tauri::command]
pub fn remove_allowed_directory(path: String) -> Result<Vec<PathBuf>, MediaStoreError> {
    config::revoke_directory(&PathBuf::from(path))
}

#[tauri::command]
pub fn set_delete_mode(mode: DeleteMode) -> Result<(), MediaStoreError> {
    config::set_delete_mode(mode)
}

#[tauri::command]
pub fn set_require_consent(required: bool) -> Result<(), MediaStoreError> {
    config::set_require_consent(required)
}
