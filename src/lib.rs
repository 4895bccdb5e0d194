//! Media Store - delete photos and videos and rename videos through the host
//! media store
//!
//! Callers go through [`DeleteMedia`], which resolves a platform collaborator
//! by name from a process-wide registry and forwards each request to it. Every
//! failure carries one of the seven [`ErrorCode`] values.

// Module declarations
pub mod backends;
pub mod config;
pub mod contract;
pub mod error;
pub mod facade;
pub mod registry;
pub mod types;

#[cfg(feature = "tauri")]
pub mod commands;
#[cfg(feature = "tauri")]
pub mod plugin;

// Re-export commonly used types
pub use contract::{Capability, ContractVariant, NativeMediaStore};
pub use error::{ErrorCode, MediaStoreError, Result};
pub use facade::{DeleteMedia, MediaStoreClient};
pub use registry::{register_module, ModuleRegistry};
pub use types::*;

#[cfg(feature = "tauri")]
pub use plugin::init;
