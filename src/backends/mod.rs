//! Media store collaborators
//!
//! - `filesystem`: desktop store over the local filesystem
//! - `consent`: user confirmation prompts
//! - `mobile`: forwards to the native Android plugin (Tauri, mobile targets)

pub mod consent;
pub mod filesystem;
mod media_uri;
#[cfg(all(feature = "tauri", any(target_os = "android", target_os = "ios")))]
pub mod mobile;

pub use consent::{AutoConsent, ConsentAction, ConsentOutcome, ConsentPrompt, ConsentRequest};
#[cfg(feature = "tauri")]
pub use consent::DialogConsent;
pub use filesystem::FilesystemMediaStore;
pub use media_uri::uri_to_path;
#[cfg(all(feature = "tauri", any(target_os = "android", target_os = "ios")))]
pub use mobile::MobileMediaStore;
