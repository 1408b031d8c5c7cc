//! Content store commands: seed, show, reset.

use std::sync::Arc;

use tracing::info;

use pixelpunk_content::{ContentRepository, ContentService, LocalCache, RemoteStore};
use pixelpunk_storefront::config::StorefrontConfig;

/// Build the content facade the same way the storefront does.
fn build_service() -> Result<ContentService, Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let config = StorefrontConfig::from_env()?;

    let repo = match &config.remote_store {
        Some(remote) => {
            Some(Arc::new(RemoteStore::new(remote)?) as Arc<dyn ContentRepository>)
        }
        None => None,
    };
    let cache = LocalCache::new(config.cache_path());

    Ok(ContentService::new(repo, Some(cache)))
}

/// Seed an empty content store with the built-in defaults.
///
/// Running against a store that already has content is harmless: only empty
/// collections and a missing settings document are seeded.
///
/// # Errors
///
/// Returns an error if configuration cannot be loaded or the store client
/// fails to build.
pub async fn seed() -> Result<(), Box<dyn std::error::Error>> {
    let service = build_service()?;
    service.init().await;
    service.dispose();
    info!("content store seeded");
    Ok(())
}

/// Print the merged site content as JSON.
///
/// # Errors
///
/// Returns an error if configuration cannot be loaded or the snapshot fails
/// to serialize.
#[allow(clippy::print_stdout)]
pub async fn show() -> Result<(), Box<dyn std::error::Error>> {
    let service = build_service()?;
    service.init().await;

    let content = service.content();
    println!("{}", serde_json::to_string_pretty(&content)?);
    Ok(())
}

/// Wipe every edit and restore the built-in defaults.
///
/// # Errors
///
/// Returns an error if `--yes` was not passed (the reset is destructive) or
/// if configuration cannot be loaded.
pub async fn reset(yes: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !yes {
        return Err("refusing to reset without --yes (this wipes every edit)".into());
    }

    let service = build_service()?;
    service.init().await;
    service.reset_to_defaults().await;
    service.dispose();
    info!("content store reset to defaults");
    Ok(())
}
