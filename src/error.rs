//! Error codes and the rejection type returned by every media store call
//!
//! The set of codes is closed: a [`MediaStoreError`] always carries one of the
//! seven [`ErrorCode`] values, so an uncoded platform error cannot reach the
//! caller.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reason a media store request failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    #[serde(rename = "ERROR_WRITE_EXTERNAL_STORAGE_PERMISSION_NEEDED")]
    WriteExternalStoragePermissionNeeded,
    #[serde(rename = "ERROR_URIS_NOT_FOUND")]
    UrisNotFound,
    #[serde(rename = "ERROR_USER_REJECTED")]
    UserRejected,
    #[serde(rename = "ERROR_URIS_PARAMETER_NULL")]
    UrisParameterNull,
    #[serde(rename = "ERROR_URIS_PARAMETER_INVALID")]
    UrisParameterInvalid,
    #[serde(rename = "ERROR_MODULE_NOT_INITIALIZED")]
    ModuleNotInitialized,
    #[serde(rename = "ERROR_UNEXPECTED")]
    Unexpected,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 7] = [
        ErrorCode::WriteExternalStoragePermissionNeeded,
        ErrorCode::UrisNotFound,
        ErrorCode::UserRejected,
        ErrorCode::UrisParameterNull,
        ErrorCode::UrisParameterInvalid,
        ErrorCode::ModuleNotInitialized,
        ErrorCode::Unexpected,
    ];

    /// Wire value of the code, as seen by the caller
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::WriteExternalStoragePermissionNeeded => {
                "ERROR_WRITE_EXTERNAL_STORAGE_PERMISSION_NEEDED"
            }
            ErrorCode::UrisNotFound => "ERROR_URIS_NOT_FOUND",
            ErrorCode::UserRejected => "ERROR_USER_REJECTED",
            ErrorCode::UrisParameterNull => "ERROR_URIS_PARAMETER_NULL",
            ErrorCode::UrisParameterInvalid => "ERROR_URIS_PARAMETER_INVALID",
            ErrorCode::ModuleNotInitialized => "ERROR_MODULE_NOT_INITIALIZED",
            ErrorCode::Unexpected => "ERROR_UNEXPECTED",
        }
    }

    /// Map an arbitrary code string onto the closed set.
    ///
    /// Unknown values collapse to [`ErrorCode::Unexpected`].
    pub fn from_code_lossy(code: &str) -> Self {
        code.parse().unwrap_or(ErrorCode::Unexpected)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorCode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ErrorCode::ALL
            .iter()
            .copied()
            .find(|code| code.as_str() == s)
            .ok_or_else(|| format!("Unknown media store error code: {}", s))
    }
}

/// Rejection value of a media store request
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
#[error("{code}: {message}")]
pub struct MediaStoreError {
    pub code: ErrorCode,
    pub message: String,
}

impl MediaStoreError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn permission_needed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::WriteExternalStoragePermissionNeeded, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::UrisNotFound, message)
    }

    pub fn user_rejected(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::UserRejected, message)
    }

    pub fn parameter_null(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::UrisParameterNull, message)
    }

    pub fn parameter_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::UrisParameterInvalid, message)
    }

    pub fn not_initialized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ModuleNotInitialized, message)
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unexpected, message)
    }

    /// Build an error from a native rejection, keeping its code only if it
    /// belongs to the closed set
    pub fn from_rejection(code: Option<&str>, message: Option<String>) -> Self {
        let mapped = code.map(ErrorCode::from_code_lossy).unwrap_or(ErrorCode::Unexpected);
        let message = match (mapped, code, message) {
            (ErrorCode::Unexpected, Some(raw), Some(msg)) if raw != mapped.as_str() => {
                format!("{}: {}", raw, msg)
            }
            (_, _, Some(msg)) => msg,
            (_, Some(raw), None) => raw.to_string(),
            (_, None, None) => "Unexpected error from the native media store".to_string(),
        };
        Self::new(mapped, message)
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }
}

pub type Result<T> = std::result::Result<T, MediaStoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_strings_round_trip_through_from_str() {
        for code in ErrorCode::ALL {
            assert_eq!(code.as_str().parse::<ErrorCode>().unwrap(), code);
        }
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&ErrorCode::UserRejected).unwrap();
        assert_eq!(json, "\"ERROR_USER_REJECTED\"");

        let code: ErrorCode = serde_json::from_str("\"ERROR_URIS_NOT_FOUND\"").unwrap();
        assert_eq!(code, ErrorCode::UrisNotFound);
    }

    #[test]
    fn test_unknown_code_is_unexpected() {
        assert!("SecurityException".parse::<ErrorCode>().is_err());
        assert_eq!(
            ErrorCode::from_code_lossy("SecurityException"),
            ErrorCode::Unexpected
        );
        assert_eq!(
            ErrorCode::from_code_lossy("ERROR_USER_REJECTED"),
            ErrorCode::UserRejected
        );
    }

    #[test]
    fn test_rejection_with_known_code() {
        let err = MediaStoreError::from_rejection(
            Some("ERROR_USER_REJECTED"),
            Some("The user rejected the deletion of the media".to_string()),
        );
        assert_eq!(err.code, ErrorCode::UserRejected);
        assert_eq!(err.message, "The user rejected the deletion of the media");
    }

    #[test]
    fn test_rejection_with_unknown_code_is_mapped() {
        let err = MediaStoreError::from_rejection(
            Some("ERROR_RENAME_FAILED"),
            Some("Error: Failed to rename the video".to_string()),
        );
        assert_eq!(err.code, ErrorCode::Unexpected);
        assert_eq!(
            err.message,
            "ERROR_RENAME_FAILED: Error: Failed to rename the video"
        );

        let err = MediaStoreError::from_rejection(None, None);
        assert_eq!(err.code, ErrorCode::Unexpected);
    }

    #[test]
    fn test_error_serializes_code_and_message() {
        let err = MediaStoreError::not_found("Error: some uris were not found on device");
        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(value["code"], "ERROR_URIS_NOT_FOUND");
        assert_eq!(value["message"], "Error: some uris were not found on device");
        assert_eq!(
            err.to_string(),
            "ERROR_URIS_NOT_FOUND: Error: some uris were not found on device"
        );
    }
}
