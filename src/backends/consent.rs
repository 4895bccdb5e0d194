//! User confirmation before media is modified
//!
//! Deleting or renaming media the app does not own needs the user's consent.
//! A [`ConsentPrompt`] shows the request and reports what the user chose.

use async_trait::async_trait;
use std::path::PathBuf;

use crate::types::MediaKind;

/// Result code reported when a prompt closes without an answer
pub const RESULT_DISMISSED: i32 = -1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsentAction {
    Delete(MediaKind),
    Rename { new_name: String },
}

/// What the user is asked to approve
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsentRequest {
    pub action: ConsentAction,
    pub paths: Vec<PathBuf>,
}

impl ConsentRequest {
    pub fn delete(kind: MediaKind, paths: Vec<PathBuf>) -> Self {
        Self {
            action: ConsentAction::Delete(kind),
            paths,
        }
    }

    pub fn rename(path: PathBuf, new_name: String) -> Self {
        Self {
            action: ConsentAction::Rename { new_name },
            paths: vec![path],
        }
    }

    pub fn title(&self) -> String {
        match &self.action {
            ConsentAction::Delete(MediaKind::Photo) => "Delete photos?".to_string(),
            ConsentAction::Delete(MediaKind::Video) => "Delete videos?".to_string(),
            ConsentAction::Rename { .. } => "Rename video?".to_string(),
        }
    }

    pub fn message(&self) -> String {
        match &self.action {
            ConsentAction::Delete(_) if self.paths.len() == 1 => format!(
                "Allow this app to delete '{}'?",
                file_label(&self.paths[0])
            ),
            ConsentAction::Delete(kind) => format!(
                "Allow this app to delete {} {}?",
                self.paths.len(),
                kind.label()
            ),
            ConsentAction::Rename { new_name } => format!(
                "Allow this app to rename '{}' to '{}'?",
                self.paths.first().map(|p| file_label(p)).unwrap_or_default(),
                new_name
            ),
        }
    }
}

fn file_label(path: &std::path::Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentOutcome {
    Granted,
    Denied,
    /// The prompt itself failed, with a platform result code
    Failed(i32),
    /// No way to ask the user is available
    Unavailable,
}

#[async_trait]
pub trait ConsentPrompt: Send + Sync {
    async fn confirm(&self, request: &ConsentRequest) -> ConsentOutcome;
}

/// Grants every request without asking
#[derive(Debug, Default, Clone, Copy)]
pub struct AutoConsent;

#[async_trait]
impl ConsentPrompt for AutoConsent {
    async fn confirm(&self, _request: &ConsentRequest) -> ConsentOutcome {
        ConsentOutcome::Granted
    }
}

/// Native confirmation dialog shown through `tauri-plugin-dialog`
#[cfg(feature = "tauri")]
pub struct DialogConsent<R: tauri::Runtime> {
    app: tauri::AppHandle<R>,
}

#[cfg(feature = "tauri")]
impl<R: tauri::Runtime> DialogConsent<R> {
    pub fn new(app: tauri::AppHandle<R>) -> Self {
        Self { app }
    }
}

#[cfg(feature = "tauri")]
#[async_trait]
impl<R: tauri::Runtime> ConsentPrompt for DialogConsent<R> {
    async fn confirm(&self, request: &ConsentRequest) -> ConsentOutcome {
        use tauri::Manager;
        use tauri_plugin_dialog::{Dialog, DialogExt, MessageDialogButtons, MessageDialogKind};

        // `dialog()` panics when the host app never installed the dialog plugin
        if self.app.try_state::<Dialog<R>>().is_none() {
            log::warn!("tauri-plugin-dialog is not installed, cannot ask for consent");
            return ConsentOutcome::Unavailable;
        }

        let (tx, rx) = tokio::sync::oneshot::channel();
        self.app
            .dialog()
            .message(request.message())
            .title(request.title())
            .kind(MessageDialogKind::Warning)
            .buttons(MessageDialogButtons::OkCancel)
            .show(move |confirmed| {
                let _ = tx.send(confirmed);
            });

        match rx.await {
            Ok(true) => ConsentOutcome::Granted,
            Ok(false) => ConsentOutcome::Denied,
            Err(_) => {
                log::warn!("Consent dialog closed without a result");
                ConsentOutcome::Failed(RESULT_DISMISSED)
            }
        }
    }
}
