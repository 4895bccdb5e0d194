//! Turning media URIs into filesystem paths
//!
//! Accepted forms:
//! - `file:///abs/path` (percent-encoded)
//! - plain absolute paths
//! - any other `scheme://authority/path`, whose path component is used

use std::path::PathBuf;

use crate::error::{MediaStoreError, Result};

fn invalid(uri: &str) -> MediaStoreError {
    MediaStoreError::parameter_invalid(format!("Error: '{}' is not a valid uri", uri))
}

fn is_scheme(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Resolve a media URI to an absolute filesystem path
pub fn uri_to_path(uri: &str) -> Result<PathBuf> {
    let trimmed = uri.trim();
    if trimmed.is_empty() {
        return Err(invalid(uri));
    }

    let raw_path = match trimmed.split_once("://") {
        Some((scheme, rest)) => {
            if !is_scheme(scheme) {
                return Err(invalid(uri));
            }
            // Drop the authority, keep the path
            let path = rest.find('/').map(|i| &rest[i..]).unwrap_or("");
            let path = path.split(['?', '#']).next().unwrap_or("");
            let decoded = urlencoding::decode(path)
                .map_err(|_| invalid(uri))?
                .into_owned();

            // file:///C:/Users/... on Windows
            #[cfg(windows)]
            let decoded = match decoded.strip_prefix('/') {
                Some(rest) if rest.get(1..2) == Some(":") => rest.to_string(),
                _ => decoded,
            };

            decoded
        }
        None => trimmed.to_string(),
    };

    let path = PathBuf::from(raw_path);
    if !path.is_absolute() {
        return Err(invalid(uri));
    }
    Ok(path)
}
