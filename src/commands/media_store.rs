//! Media store Tauri commands
//!
//! Each command forwards to [`DeleteMedia`]; only the loosely typed `uris`
//! argument is unmarshalled here.

use crate::error::MediaStoreError;
use crate::facade::DeleteMedia;
use crate::types::parse_uri_list;

#[tauri::command]
pub async fn delete_photos(uris: Option<serde_json::Value>) -> Result<(), MediaStoreError> {
    DeleteMedia::delete_photos(parse_uri_list(uris)?).await
}

#[tauri::command]
pub async fn delete_videos(uris: Option<serde_json::Value>) -> Result<(), MediaStoreError> {
    DeleteMedia::delete_videos(parse_uri_list(uris)?).await
}

#[tauri::command]
pub async fn rename_video(uri: String, new_name: String) -> Result<(), MediaStoreError> {
    DeleteMedia::rename_video(uri, new_name).await
}
