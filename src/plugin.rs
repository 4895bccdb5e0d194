//! Tauri plugin wiring
//!
//! Registers the platform media store under `ReactNativeMediaStore` when the
//! plugin is set up and exposes the media store commands to the webview.

use log::info;
#[cfg(target_os = "ios")]
use log::warn;
use std::sync::Arc;
use tauri::plugin::{Builder, TauriPlugin};
use tauri::Runtime;

use crate::commands;
use crate::contract::ContractVariant;
use crate::registry;

pub const PLUGIN_NAME: &str = "media-store";

/// Package of the Kotlin plugin class on Android
#[cfg(target_os = "android")]
const ANDROID_PLUGIN_PACKAGE: &str = "com.mediastore";

/// Build the plugin
pub fn init<R: Runtime>() -> TauriPlugin<R> {
    Builder::new(PLUGIN_NAME)
        .invoke_handler(tauri::generate_handler![
            // Media store operations
            commands::delete_photos,
            commands::delete_videos,
            commands::rename_video,
            // Settings operations
            commands::get_store_config,
            commands::add_allowed_directory,
            commands::remove_allowed_directory,
            commands::set_delete_mode,
            commands::set_require_consent,
        ])
        .setup(|app, api| {
            let variant = ContractVariant::ReactNativeMediaStore;

            #[cfg(target_os = "android")]
            {
                let _ = app;
                let handle =
                    api.register_android_plugin(ANDROID_PLUGIN_PACKAGE, variant.module_name())?;
                registry::register_module(
                    variant,
                    Arc::new(crate::backends::MobileMediaStore::new(handle)),
                );
            }

            #[cfg(target_os = "ios")]
            {
                let _ = (app, api);
                warn!(
                    "No native {} module on iOS; media store calls will be rejected",
                    variant.module_name()
                );
            }

            #[cfg(not(any(target_os = "android", target_os = "ios")))]
            {
                let _ = api;
                let store = crate::backends::FilesystemMediaStore::with_global_config()
                    .with_consent(Arc::new(crate::backends::DialogConsent::new(app.clone())));
                registry::register_module(variant, Arc::new(store));
            }

            info!("Media store plugin ready ({})", variant.module_name());
            Ok(())
        })
        .build()
}
