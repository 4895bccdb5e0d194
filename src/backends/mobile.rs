//! Media store forwarding to the native mobile plugin
//!
//! The Kotlin side is registered by class name and does the MediaStore work
//! (delete/write requests, the system consent sheet). Rejections come back as
//! `{code, message}` and are mapped onto the closed error set.

use async_trait::async_trait;
use log::{debug, warn};
use serde::Serialize;
use tauri::plugin::mobile::PluginInvokeError;
use tauri::plugin::PluginHandle;
use tauri::Runtime;

use crate::contract::NativeMediaStore;
use crate::error::{MediaStoreError, Result};
use crate::types::{DeleteRequest, RenameRequest};

pub struct MobileMediaStore<R: Runtime> {
    handle: PluginHandle<R>,
}

impl<R: Runtime> MobileMediaStore<R> {
    pub fn new(handle: PluginHandle<R>) -> Self {
        Self { handle }
    }

    async fn invoke<P>(&self, method: &'static str, payload: P) -> Result<()>
    where
        P: Serialize + Send + 'static,
    {
        let handle = self.handle.clone();
        debug!("Invoking native media store method {}", method);

        tokio::task::spawn_blocking(move || {
            handle
                .run_mobile_plugin::<serde_json::Value>(method, payload)
                .map(|_| ())
                .map_err(map_invoke_error)
        })
        .await
        .map_err(|e| MediaStoreError::unexpected(format!("Task join error: {}", e)))?
    }
}

fn map_invoke_error(err: PluginInvokeError) -> MediaStoreError {
    match err {
        PluginInvokeError::InvokeRejected(response) => {
            MediaStoreError::from_rejection(response.code.as_deref(), response.message)
        }
        other => {
            warn!("Native media store invocation failed: {}", other);
            MediaStoreError::unexpected(other.to_string())
        }
    }
}

#[async_trait]
impl<R: Runtime> NativeMediaStore for MobileMediaStore<R> {
    async fn delete_photos(&self, uris: Vec<String>) -> Result<()> {
        self.invoke("deletePhotos", DeleteRequest { uris }).await
    }

    async fn delete_videos(&self, uris: Vec<String>) -> Result<()> {
        self.invoke("deleteVideos", DeleteRequest { uris }).await
    }

    async fn rename_video(&self, uri: String, new_name: String) -> Result<()> {
        self.invoke("renameVideo", RenameRequest { uri, new_name })
            .await
    }
}
