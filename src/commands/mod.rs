//! Tauri commands module
//!
//! Commands are organized by domain:
//! - Media store operations (delete photos, delete videos, rename video)
//! - Settings operations (allowed directories, delete mode, consent)

mod media_store;
mod settings;

// Use wildcard re-exports to include macro-generated items from #[tauri::command]
pub use media_store::*;
pub use settings::*;
