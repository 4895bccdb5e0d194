//! Shared types and data structures for the media store bridge

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{MediaStoreError, Result};

// ============================================================================
// Media Collections
// ============================================================================

pub const PHOTO_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "bmp", "webp", "tiff", "heic", "heif", "avif",
];

pub const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "mkv", "avi", "mov", "wmv", "flv", "webm", "m4v", "3gp", "ts",
];

/// Media collection a request is scoped to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Photo,
    Video,
}

impl MediaKind {
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            MediaKind::Photo => PHOTO_EXTENSIONS,
            MediaKind::Video => VIDEO_EXTENSIONS,
        }
    }

    /// Check if a file belongs to this collection based on extension
    pub fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| self.extensions().contains(&e.to_lowercase().as_str()))
            .unwrap_or(false)
    }

    /// Plural noun used in log and error messages
    pub fn label(&self) -> &'static str {
        match self {
            MediaKind::Photo => "photos",
            MediaKind::Video => "videos",
        }
    }
}

// ============================================================================
// Request Payloads
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameRequest {
    pub uri: String,
    pub new_name: String,
}

/// Unmarshal a loosely typed `uris` argument into a list of strings.
///
/// A missing value is `ERROR_URIS_PARAMETER_NULL`; anything that is not an
/// array of strings is `ERROR_URIS_PARAMETER_INVALID`.
pub fn parse_uri_list(value: Option<serde_json::Value>) -> Result<Vec<String>> {
    let items = match value {
        None | Some(serde_json::Value::Null) => {
            return Err(MediaStoreError::parameter_null("Error: uris parameter is null"));
        }
        Some(serde_json::Value::Array(items)) => items,
        Some(_) => {
            return Err(MediaStoreError::parameter_invalid(
                "Error: uris parameter should be an array of valid uri strings",
            ));
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            serde_json::Value::String(uri) => Ok(uri),
            _ => Err(MediaStoreError::parameter_invalid(format!(
                "Error: element {} of uris is not a string",
                i
            ))),
        })
        .collect()
}
