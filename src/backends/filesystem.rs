//! Media store backed by the local filesystem
//!
//! Requests are checked in this order: write access, parameters, presence in
//! the requested collection, allowed directories, user consent. Only then is
//! anything touched, so a rejected request leaves every file in place.

use async_trait::async_trait;
use log::{debug, info, warn};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::consent::{ConsentAction, ConsentOutcome, ConsentPrompt, ConsentRequest};
use super::media_uri::uri_to_path;
use crate::config::{self, DeleteMode, SharedConfig, StoreConfig};
use crate::contract::NativeMediaStore;
use crate::error::{MediaStoreError, Result};
use crate::types::MediaKind;

pub struct FilesystemMediaStore {
    config: SharedConfig,
    consent: Option<Arc<dyn ConsentPrompt>>,
    /// One consent prompt on screen at a time
    prompt_lock: tokio::sync::Mutex<()>,
}

impl FilesystemMediaStore {
    pub fn new(config: SharedConfig) -> Self {
        Self {
            config,
            consent: None,
            prompt_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// Store reading the process-wide configuration
    pub fn with_global_config() -> Self {
        Self::new(config::shared())
    }

    pub fn with_consent(mut self, prompt: Arc<dyn ConsentPrompt>) -> Self {
        self.consent = Some(prompt);
        self
    }

    fn config_snapshot(&self) -> Result<StoreConfig> {
        self.config
            .read()
            .map(|c| c.clone())
            .map_err(|e| MediaStoreError::unexpected(format!("Config lock error: {}", e)))
    }

    async fn ask_consent(&self, config: &StoreConfig, request: ConsentRequest) -> Result<()> {
        if !config.require_consent {
            return Ok(());
        }

        let prompt = self.consent.as_ref().ok_or_else(|| {
            MediaStoreError::not_initialized(
                "Error: no consent prompt was installed for the media store module",
            )
        })?;

        let _guard = self.prompt_lock.lock().await;
        debug!("Asking consent: {}", request.message());
        match prompt.confirm(&request).await {
            ConsentOutcome::Granted => Ok(()),
            ConsentOutcome::Denied => {
                info!("User rejected: {}", request.title());
                Err(MediaStoreError::user_rejected(match request.action {
                    ConsentAction::Rename { .. } => {
                        "The user rejected the rename operation"
                    }
                    ConsentAction::Delete(_) => {
                        "The user rejected the deletion of the media"
                    }
                }))
            }
            ConsentOutcome::Unavailable => Err(MediaStoreError::not_initialized(
                "Error: the consent prompt of the media store module is not initialized",
            )),
            ConsentOutcome::Failed(code) => {
                warn!("Consent prompt failed with result code {}", code);
                Err(MediaStoreError::unexpected(format!(
                    "Consent prompt returned error code: {}",
                    code
                )))
            }
        }
    }

    async fn delete_media(&self, kind: MediaKind, uris: Vec<String>) -> Result<()> {
        info!("delete {}: {} uris", kind.label(), uris.len());

        let config = self.config_snapshot()?;
        if !config.has_write_access() {
            warn!("Delete {} refused: no writable directories", kind.label());
            return Err(MediaStoreError::permission_needed(
                "Error: write permission is needed to delete media",
            ));
        }

        if uris.is_empty() {
            debug!("Nothing to delete");
            return Ok(());
        }

        let paths = uris
            .iter()
            .map(|uri| uri_to_path(uri))
            .collect::<Result<Vec<_>>>()?;

        let lookup_config = config.clone();
        let validated =
            run_blocking(move || locate_media(&lookup_config, kind, &paths)).await?;

        self.ask_consent(&config, ConsentRequest::delete(kind, validated.clone()))
            .await?;

        let mode = config.delete_mode;
        let count = validated.len();
        run_blocking(move || remove_files(&validated, mode)).await?;

        info!("Deleted {} {} ({:?})", count, kind.label(), mode);
        Ok(())
    }
}

#[async_trait]
impl NativeMediaStore for FilesystemMediaStore {
    async fn delete_photos(&self, uris: Vec<String>) -> Result<()> {
        self.delete_media(MediaKind::Photo, uris).await
    }

    async fn delete_videos(&self, uris: Vec<String>) -> Result<()> {
        self.delete_media(MediaKind::Video, uris).await
    }

    async fn rename_video(&self, uri: String, new_name: String) -> Result<()> {
        info!("rename_video: from={:?} to={:?}", uri, new_name);

        let config = self.config_snapshot()?;
        if !config.has_write_access() {
            return Err(MediaStoreError::permission_needed(
                "Error: write permission is needed to rename media",
            ));
        }

        if uri.trim().is_empty() {
            return Err(MediaStoreError::parameter_invalid(
                "Error: file path is null or empty",
            ));
        }
        if new_name.trim().is_empty() || new_name.contains(['/', '\\']) {
            return Err(MediaStoreError::parameter_invalid(
                "Error: new file name is invalid",
            ));
        }

        let path = uri_to_path(&uri)?;
        let lookup_config = config.clone();
        let validated = run_blocking(move || {
            let mut found = locate_media(&lookup_config, MediaKind::Video, &[path])?;
            Ok(found.remove(0))
        })
        .await?;

        let destination = renamed_path(&validated, &new_name);
        if destination == validated {
            debug!("Video already named {:?}", new_name);
            return Ok(());
        }

        self.ask_consent(
            &config,
            ConsentRequest::rename(validated.clone(), file_name_of(&destination)),
        )
        .await?;

        let dest = destination.clone();
        run_blocking(move || rename_file(&validated, &dest)).await?;

        info!("Renamed video to {:?}", destination);
        Ok(())
    }
}

/// Run blocking filesystem work off the async runtime
async fn run_blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| MediaStoreError::unexpected(format!("Task join error: {}", e)))?
}

/// Find every requested file in the collection and check it may be modified.
///
/// All-or-nothing: if any path is missing, of the wrong kind, or repeated, the
/// whole request is not found.
fn locate_media(config: &StoreConfig, kind: MediaKind, paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut seen = HashSet::new();
    let found: Vec<PathBuf> = paths
        .iter()
        .filter(|p| p.is_file() && kind.matches(p))
        .filter_map(|p| p.canonicalize().ok())
        .filter(|p| seen.insert(p.clone()))
        .collect();

    if found.len() != paths.len() {
        warn!(
            "Only {} of {} {} found",
            found.len(),
            paths.len(),
            kind.label()
        );
        return Err(MediaStoreError::not_found(
            "Error: some uris were not found on device",
        ));
    }

    found
        .iter()
        .map(|p| config.validate_path(p))
        .collect()
}

/// Remove every file, continuing past failures.
///
/// Files are checked before anything is removed, but an I/O error part-way
/// through a batch leaves the files already removed gone; the error names the
/// ones that could not be removed.
fn remove_files(paths: &[PathBuf], mode: DeleteMode) -> Result<()> {
    debug!("Removing {} files ({:?})", paths.len(), mode);

    let failed: Vec<String> = paths
        .iter()
        .filter_map(|path| {
            let removed = match mode {
                DeleteMode::Trash => trash::delete(path).map_err(|e| e.to_string()),
                DeleteMode::Permanent => fs::remove_file(path).map_err(|e| e.to_string()),
            };
            removed.err().map(|e| {
                warn!("Failed to delete file {:?}: {}", path, e);
                file_name_of(path)
            })
        })
        .collect();

    if failed.is_empty() {
        return Ok(());
    }

    Err(MediaStoreError::unexpected(format!(
        "Error: failed to delete {} of {} files: {}",
        failed.len(),
        paths.len(),
        failed.join(", ")
    )))
}

/// Destination for a rename: `new_name` in the same directory, keeping the
/// source extension
fn renamed_path(source: &Path, new_name: &str) -> PathBuf {
    let file_name = match source.extension().and_then(|e| e.to_str()) {
        Some(ext)
            if !new_name
                .to_lowercase()
                .ends_with(&format!(".{}", ext.to_lowercase())) =>
        {
            format!("{}.{}", new_name, ext)
        }
        _ => new_name.to_string(),
    };
    source.with_file_name(file_name)
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

fn already_exists(destination: &Path) -> MediaStoreError {
    warn!("Rename failed: destination already exists: {:?}", destination);
    MediaStoreError::unexpected(format!(
        "Error: Failed to rename the video, '{}' already exists",
        file_name_of(destination)
    ))
}

fn rename_failed(e: std::io::Error) -> MediaStoreError {
    warn!("Rename failed: {:?}", e);
    MediaStoreError::unexpected(format!("Error: Failed to rename the video: {}", e))
}

/// Rename without replacing an existing destination.
///
/// Linking then unlinking fails atomically if the destination exists. Where
/// hard links are unsupported (FAT, some network mounts) this falls back to
/// a checked `fs::rename`, which can still lose a file created in between.
fn rename_file(source: &Path, destination: &Path) -> Result<()> {
    match fs::hard_link(source, destination) {
        Ok(()) => fs::remove_file(source).map_err(|e| {
            let _ = fs::remove_file(destination);
            rename_failed(e)
        }),
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Err(already_exists(destination)),
        Err(e) => {
            debug!("Hard link unavailable ({}), falling back to rename", e);
            if destination.exists() {
                return Err(already_exists(destination));
            }
            fs::rename(source, destination).map_err(rename_failed)
        }
    }
}
