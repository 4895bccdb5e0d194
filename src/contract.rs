//! Contract a platform media store collaborator must provide
//!
//! Collaborators are registered under a fixed name (see [`ContractVariant`])
//! and resolved by the façade at call time. Two names exist: the current
//! `ReactNativeMediaStore` contract and the older `RTNDeleteMedia` contract,
//! which never had a rename operation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{MediaStoreError, Result};

/// A single operation a collaborator may declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Capability {
    DeletePhotos,
    DeleteVideos,
    RenameVideo,
}

impl Capability {
    pub fn method_name(&self) -> &'static str {
        match self {
            Capability::DeletePhotos => "deletePhotos",
            Capability::DeleteVideos => "deleteVideos",
            Capability::RenameVideo => "renameVideo",
        }
    }
}

/// Named contract a collaborator is registered under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ContractVariant {
    #[default]
    #[serde(rename = "ReactNativeMediaStore")]
    ReactNativeMediaStore,
    #[serde(rename = "RTNDeleteMedia")]
    RtnDeleteMedia,
}

impl ContractVariant {
    pub const ALL: [ContractVariant; 2] = [
        ContractVariant::ReactNativeMediaStore,
        ContractVariant::RtnDeleteMedia,
    ];

    /// Registry key the host registers the collaborator under
    pub fn module_name(&self) -> &'static str {
        match self {
            ContractVariant::ReactNativeMediaStore => "ReactNativeMediaStore",
            ContractVariant::RtnDeleteMedia => "RTNDeleteMedia",
        }
    }

    pub fn from_module_name(name: &str) -> Option<Self> {
        ContractVariant::ALL
            .iter()
            .copied()
            .find(|v| v.module_name() == name)
    }

    pub fn capabilities(&self) -> &'static [Capability] {
        match self {
            ContractVariant::ReactNativeMediaStore => &[
                Capability::DeletePhotos,
                Capability::DeleteVideos,
                Capability::RenameVideo,
            ],
            ContractVariant::RtnDeleteMedia => {
                &[Capability::DeletePhotos, Capability::DeleteVideos]
            }
        }
    }

    pub fn supports(&self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }
}

/// Asynchronous media store operations implemented by a platform collaborator.
///
/// Each call is a single round trip with two outcomes. Implementations decide
/// validation and failure granularity. A failed delete may have removed some
/// of the batch, so callers should re-query rather than assume nothing changed.
#[async_trait]
pub trait NativeMediaStore: Send + Sync {
    /// Operations this collaborator actually implements.
    ///
    /// The default claims the full `ReactNativeMediaStore` set. A collaborator
    /// that keeps the default `rename_video` must override this to drop
    /// [`Capability::RenameVideo`], so the façade rejects renames before any
    /// round trip. Either way the caller sees `ERROR_MODULE_NOT_INITIALIZED`.
    fn capabilities(&self) -> &[Capability] {
        ContractVariant::ReactNativeMediaStore.capabilities()
    }

    /// Delete each photo in `uris`
    async fn delete_photos(&self, uris: Vec<String>) -> Result<()>;

    /// Delete each video in `uris`
    async fn delete_videos(&self, uris: Vec<String>) -> Result<()>;

    /// Give the video at `uri` a new display name.
    ///
    /// Not every contract has this operation; see [`Self::capabilities`].
    async fn rename_video(&self, uri: String, new_name: String) -> Result<()> {
        let _ = (uri, new_name);
        Err(MediaStoreError::not_initialized(
            "Error: renameVideo is not provided by this media store module",
        ))
    }
}
