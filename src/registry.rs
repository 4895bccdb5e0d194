//! Named slots for media store collaborators
//!
//! Host glue code registers a collaborator once during startup; the façade
//! resolves it by name on every call. The process-wide registry lives for the
//! whole process and is never torn down.

use dashmap::DashMap;
use log::{debug, info, warn};
use once_cell::sync::Lazy;
use std::sync::Arc;

use crate::contract::{ContractVariant, NativeMediaStore};
use crate::error::{MediaStoreError, Result};

/// Shared handle to a registered collaborator
pub type ModuleHandle = Arc<dyn NativeMediaStore>;

/// Collaborators keyed by module name
#[derive(Default)]
pub struct ModuleRegistry {
    modules: DashMap<String, ModuleHandle>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a collaborator to a name.
    ///
    /// The first registration wins; returns false if the name is taken.
    pub fn register(&self, name: &str, module: ModuleHandle) -> bool {
        match self.modules.entry(name.to_string()) {
            dashmap::mapref::entry::Entry::Occupied(_) => {
                warn!("Media store module already registered: {}", name);
                false
            }
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(module);
                info!("Registered media store module: {}", name);
                true
            }
        }
    }

    /// Bind a collaborator under a contract variant's module name
    pub fn register_variant(&self, variant: ContractVariant, module: ModuleHandle) -> bool {
        self.register(variant.module_name(), module)
    }

    /// Look up a collaborator; `None` when nothing is bound under `name`
    pub fn get(&self, name: &str) -> Option<ModuleHandle> {
        self.modules.get(name).map(|entry| Arc::clone(entry.value()))
    }

    /// Resolve the collaborator for a variant, or fail with
    /// `ERROR_MODULE_NOT_INITIALIZED`
    pub fn resolve(&self, variant: ContractVariant) -> Result<ModuleHandle> {
        let name = variant.module_name();
        self.get(name).ok_or_else(|| {
            debug!("No media store module registered under {}", name);
            MediaStoreError::not_initialized(format!(
                "Error: no native module registered under '{}'",
                name
            ))
        })
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    pub fn unregister(&self, name: &str) -> Option<ModuleHandle> {
        self.modules.remove(name).map(|(_, module)| module)
    }

    /// Names of all registered collaborators, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.modules.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }
}

/// Process-wide registry used by [`crate::DeleteMedia`]
static REGISTRY: Lazy<Arc<ModuleRegistry>> = Lazy::new(|| Arc::new(ModuleRegistry::new()));

pub fn global() -> Arc<ModuleRegistry> {
    Arc::clone(&REGISTRY)
}

/// Register a collaborator in the process-wide registry
pub fn register_module(variant: ContractVariant, module: ModuleHandle) -> bool {
    REGISTRY.register_variant(variant, module)
}
