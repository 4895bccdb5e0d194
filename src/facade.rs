//! Public entry points for media store requests
//!
//! [`DeleteMedia`] forwards each call to the collaborator registered in the
//! process-wide registry. Arguments and results pass through unchanged: no
//! validation, retry, or buffering happens here.

use log::{debug, warn};
use std::sync::Arc;

use crate::contract::{Capability, ContractVariant};
use crate::error::{MediaStoreError, Result};
use crate::registry::{self, ModuleHandle, ModuleRegistry};

/// Media store client bound to one registry and one contract variant
#[derive(Clone)]
pub struct MediaStoreClient {
    registry: Arc<ModuleRegistry>,
    variant: ContractVariant,
}

impl MediaStoreClient {
    pub fn new(registry: Arc<ModuleRegistry>, variant: ContractVariant) -> Self {
        Self { registry, variant }
    }

    pub fn variant(&self) -> ContractVariant {
        self.variant
    }

    /// Resolve the collaborator and check it declares `capability`
    fn module_for(&self, capability: Capability) -> Result<ModuleHandle> {
        let module = self.registry.resolve(self.variant)?;

        if !self.variant.supports(capability) || !module.capabilities().contains(&capability) {
            warn!(
                "{} called on {}, which does not declare it",
                capability.method_name(),
                self.variant.module_name()
            );
            return Err(MediaStoreError::not_initialized(format!(
                "Error: '{}' does not provide {}",
                self.variant.module_name(),
                capability.method_name()
            )));
        }

        Ok(module)
    }

    pub async fn delete_photos(&self, uris: Vec<String>) -> Result<()> {
        debug!("deletePhotos: {} uris via {:?}", uris.len(), self.variant);
        self.module_for(Capability::DeletePhotos)?
            .delete_photos(uris)
            .await
    }

    pub async fn delete_videos(&self, uris: Vec<String>) -> Result<()> {
        debug!("deleteVideos: {} uris via {:?}", uris.len(), self.variant);
        self.module_for(Capability::DeleteVideos)?
            .delete_videos(uris)
            .await
    }

    pub async fn rename_video(&self, uri: String, new_name: String) -> Result<()> {
        debug!("renameVideo: uri={:?} new_name={:?}", uri, new_name);
        self.module_for(Capability::RenameVideo)?
            .rename_video(uri, new_name)
            .await
    }
}

/// Static façade over the process-wide registry
pub struct DeleteMedia;

impl DeleteMedia {
    /// Client for the default `ReactNativeMediaStore` contract
    pub fn client() -> MediaStoreClient {
        Self::using(ContractVariant::default())
    }

    /// Client for an explicitly chosen contract variant
    pub fn using(variant: ContractVariant) -> MediaStoreClient {
        MediaStoreClient::new(registry::global(), variant)
    }

    pub async fn delete_photos(uris: Vec<String>) -> Result<()> {
        Self::client().delete_photos(uris).await
    }

    pub async fn delete_videos(uris: Vec<String>) -> Result<()> {
        Self::client().delete_videos(uris).await
    }

    pub async fn rename_video(uri: String, new_name: String) -> Result<()> {
        Self::client().rename_video(uri, new_name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::NativeMediaStore;
    use crate::error::ErrorCode;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        DeletePhotos(Vec<String>),
        DeleteVideos(Vec<String>),
        RenameVideo(String, String),
    }

    /// Collaborator that records calls and answers with a scripted outcome
    #[derive(Default)]
    struct RecordingStore {
        calls: Mutex<Vec<Call>>,
        reject_with: Option<ErrorCode>,
        reject_empty: bool,
        deleted: Mutex<HashSet<String>>,
    }

    impl RecordingStore {
        fn rejecting(code: ErrorCode) -> Self {
            Self {
                reject_with: Some(code),
                ..Default::default()
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn delete(&self, uris: &[String]) -> Result<()> {
            if let Some(code) = self.reject_with {
                return Err(MediaStoreError::new(code, "scripted rejection"));
            }
            if self.reject_empty && uris.is_empty() {
                return Err(MediaStoreError::parameter_invalid("empty uris"));
            }
            let mut deleted = self.deleted.lock().unwrap();
            if uris.iter().any(|u| deleted.contains(u)) {
                return Err(MediaStoreError::not_found(
                    "Error: some uris were not found on device",
                ));
            }
            deleted.extend(uris.iter().cloned());
            Ok(())
        }
    }

    #[async_trait]
    impl NativeMediaStore for RecordingStore {
        async fn delete_photos(&self, uris: Vec<String>) -> Result<()> {
            self.calls.lock().unwrap().push(Call::DeletePhotos(uris.clone()));
            self.delete(&uris)
        }

        async fn delete_videos(&self, uris: Vec<String>) -> Result<()> {
            self.calls.lock().unwrap().push(Call::DeleteVideos(uris.clone()));
            self.delete(&uris)
        }

        async fn rename_video(&self, uri: String, new_name: String) -> Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push(Call::RenameVideo(uri, new_name));
            match self.reject_with {
                Some(code) => Err(MediaStoreError::new(code, "scripted rejection")),
                None => Ok(()),
            }
        }
    }

    /// Collaborator following the delete-only contract
    struct DeleteOnlyStore {
        renamed: Mutex<bool>,
    }

    #[async_trait]
    impl NativeMediaStore for DeleteOnlyStore {
        fn capabilities(&self) -> &[Capability] {
            ContractVariant::RtnDeleteMedia.capabilities()
        }

        async fn delete_photos(&self, _uris: Vec<String>) -> Result<()> {
            Ok(())
        }

        async fn delete_videos(&self, _uris: Vec<String>) -> Result<()> {
            Ok(())
        }

        async fn rename_video(&self, _uri: String, _new_name: String) -> Result<()> {
            *self.renamed.lock().unwrap() = true;
            Ok(())
        }
    }

    fn client_with(
        variant: ContractVariant,
        store: Arc<dyn NativeMediaStore>,
    ) -> MediaStoreClient {
        let registry = Arc::new(ModuleRegistry::new());
        registry.register_variant(variant, store);
        MediaStoreClient::new(registry, variant)
    }

    #[tokio::test]
    async fn test_delete_photos_forwards_exact_sequence() {
        let store = Arc::new(RecordingStore::default());
        let client = client_with(ContractVariant::ReactNativeMediaStore, store.clone());
        let uris = vec![
            "content://media/external/images/3".to_string(),
            "content://media/external/images/1".to_string(),
            "content://media/external/images/3".to_string(),
        ];

        client.delete_photos(uris.clone()).await.unwrap();

        assert_eq!(store.calls(), vec![Call::DeletePhotos(uris)]);
    }

    #[tokio::test]
    async fn test_delete_videos_forwards_exact_sequence() {
        let store = Arc::new(RecordingStore::default());
        let client = client_with(ContractVariant::RtnDeleteMedia, store.clone());
        let uris = vec![
            "content://media/external/video/7".to_string(),
            "content://media/external/video/2".to_string(),
        ];

        client.delete_videos(uris.clone()).await.unwrap();

        assert_eq!(store.calls(), vec![Call::DeleteVideos(uris)]);
    }

    #[tokio::test]
    async fn test_rename_video_forwards_arguments_in_order() {
        let store = Arc::new(RecordingStore::default());
        let client = client_with(ContractVariant::ReactNativeMediaStore, store.clone());

        client
            .rename_video(
                "content://media/external/video/9".to_string(),
                "vacation.mp4".to_string(),
            )
            .await
            .unwrap();

        assert_eq!(
            store.calls(),
            vec![Call::RenameVideo(
                "content://media/external/video/9".to_string(),
                "vacation.mp4".to_string()
            )]
        );
    }

    #[tokio::test]
    async fn test_missing_module_rejects_every_call() {
        let client = MediaStoreClient::new(
            Arc::new(ModuleRegistry::new()),
            ContractVariant::ReactNativeMediaStore,
        );

        let photos = client.delete_photos(vec!["a".to_string()]).await;
        let videos = client.delete_videos(vec![]).await;
        let rename = client.rename_video("a".to_string(), "b".to_string()).await;

        for result in [photos, videos, rename] {
            assert_eq!(result.unwrap_err().code, ErrorCode::ModuleNotInitialized);
        }
    }

    #[tokio::test]
    async fn test_collaborator_rejections_forwarded_verbatim() {
        for code in ErrorCode::ALL {
            let store = Arc::new(RecordingStore::rejecting(code));
            let client = client_with(ContractVariant::ReactNativeMediaStore, store);

            let err = client
                .delete_photos(vec!["content://media/external/images/1".to_string()])
                .await
                .unwrap_err();

            assert_eq!(err.code, code);
            assert_eq!(err.message, "scripted rejection");
        }
    }

    #[tokio::test]
    async fn test_delete_single_photo_resolves() {
        let store = Arc::new(RecordingStore::default());
        let client = client_with(ContractVariant::ReactNativeMediaStore, store);

        let result = client
            .delete_photos(vec!["content://media/external/images/1".to_string()])
            .await;

        assert_eq!(result, Ok(()));
    }

    #[tokio::test]
    async fn test_empty_list_rejected_by_collaborator() {
        let store = Arc::new(RecordingStore {
            reject_empty: true,
            ..Default::default()
        });
        let client = client_with(ContractVariant::ReactNativeMediaStore, store.clone());

        let err = client.delete_photos(vec![]).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::UrisParameterInvalid);
        assert_eq!(store.calls(), vec![Call::DeletePhotos(vec![])]);
    }

    #[tokio::test]
    async fn test_rename_rejected_by_user() {
        let store = Arc::new(RecordingStore::rejecting(ErrorCode::UserRejected));
        let client = client_with(ContractVariant::ReactNativeMediaStore, store);

        let err = client
            .rename_video(
                "content://media/external/video/9".to_string(),
                "vacation.mp4".to_string(),
            )
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::UserRejected);
    }

    #[tokio::test]
    async fn test_second_delete_reports_not_found() {
        let store = Arc::new(RecordingStore::default());
        let client = client_with(ContractVariant::ReactNativeMediaStore, store.clone());
        let uris = vec!["content://media/external/images/1".to_string()];

        client.delete_photos(uris.clone()).await.unwrap();
        let err = client.delete_photos(uris).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::UrisNotFound);
        assert_eq!(store.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_rename_fails_fast_on_delete_only_contract() {
        let store = Arc::new(DeleteOnlyStore {
            renamed: Mutex::new(false),
        });
        let client = client_with(ContractVariant::RtnDeleteMedia, store.clone());

        let err = client
            .rename_video("a.mp4".to_string(), "b".to_string())
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ModuleNotInitialized);
        assert!(!*store.renamed.lock().unwrap());
        assert!(client.delete_videos(vec![]).await.is_ok());
    }

    #[tokio::test]
    async fn test_rename_fails_fast_when_collaborator_lacks_capability() {
        let store = Arc::new(DeleteOnlyStore {
            renamed: Mutex::new(false),
        });
        let client = client_with(ContractVariant::ReactNativeMediaStore, store.clone());

        let err = client
            .rename_video("a.mp4".to_string(), "b".to_string())
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ModuleNotInitialized);
        assert!(!*store.renamed.lock().unwrap());
    }

    #[tokio::test]
    async fn test_static_facade_uses_global_registry() {
        // Only this test touches the process-wide registry.
        let err = DeleteMedia::using(ContractVariant::RtnDeleteMedia)
            .delete_photos(vec!["a.jpg".to_string()])
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ModuleNotInitialized);

        let store = Arc::new(RecordingStore::default());
        assert!(registry::register_module(
            ContractVariant::ReactNativeMediaStore,
            store.clone()
        ));

        DeleteMedia::delete_photos(vec!["p".to_string()]).await.unwrap();
        DeleteMedia::delete_videos(vec!["v".to_string()]).await.unwrap();
        DeleteMedia::rename_video("v".to_string(), "w".to_string())
            .await
            .unwrap();

        assert_eq!(
            store.calls(),
            vec![
                Call::DeletePhotos(vec!["p".to_string()]),
                Call::DeleteVideos(vec!["v".to_string()]),
                Call::RenameVideo("v".to_string(), "w".to_string()),
            ]
        );
        assert_eq!(DeleteMedia::client().variant(), ContractVariant::ReactNativeMediaStore);
    }
}
