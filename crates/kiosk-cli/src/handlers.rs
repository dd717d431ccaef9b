//! Command handlers.

use crate::config::KioskConfig;
use console::style;
use kiosk_cache::{MemoryResultCache, ResultCache};
use kiosk_core::{DeviceId, PersonId, RequestContext};
use kiosk_engine::AssetSelector;
use kiosk_immich::ImmichClient;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Wire the HTTP adapter and an in-memory cache into a selector.
///
/// With a TTL configured, expired entries are purged once per TTL period
/// until the returned task is aborted.
pub fn build_selector(
    config: &KioskConfig,
) -> anyhow::Result<(AssetSelector, Option<JoinHandle<()>>)> {
    let client = ImmichClient::new(&config.immich)?;
    let cache = Arc::new(match config.cache_ttl() {
        Some(ttl) => MemoryResultCache::with_ttl(ttl),
        None => MemoryResultCache::new(),
    });
    let purge = config.cache_ttl().map(|ttl| cache.spawn_purge(ttl));
    let cache: Arc<dyn ResultCache> = cache;
    Ok((AssetSelector::new(Arc::new(client), cache), purge))
}

/// Select `count` images in a row for one device and print them as JSON.
pub async fn next(
    config: &KioskConfig,
    person: Option<String>,
    device: String,
    count: u32,
) -> anyhow::Result<()> {
    let (selector, purge) = build_selector(config)?;
    let selection = config.selection_config();
    let person = person.map(PersonId::new);
    let device = DeviceId::new(device);

    for _ in 0..count {
        let ctx = RequestContext::for_device(device.clone());
        match selector.next_asset(&ctx, &selection, person.as_ref()).await {
            Ok(asset) => println!("{}", serde_json::to_string_pretty(&asset)?),
            Err(e) => {
                eprintln!("{} {}", style("✗").red(), e);
                return Err(e.into());
            }
        }
    }

    if let Some(purge) = purge {
        purge.abort();
    }

    let stats = selector.cache().stats();
    eprintln!(
        "{} {} selected ({} cache hits, {} misses)",
        style("✓").green(),
        count,
        stats.hits,
        stats.misses
    );
    Ok(())
}

/// Print the number of assets a person appears in.
pub async fn person_stats(config: &KioskConfig, person: &str) -> anyhow::Result<()> {
    let (selector, _) = build_selector(config)?;
    let ctx = RequestContext::for_device("cli");
    let count = selector
        .person_asset_count(&ctx, &PersonId::new(person))
        .await?;
    println!("{}", count);
    Ok(())
}

/// Print the effective configuration with secrets masked.
pub fn show_config(config: &KioskConfig) -> anyhow::Result<()> {
    match KioskConfig::config_path() {
        Some(path) => eprintln!("{} {}", style("Config file:").dim(), path.display()),
        None => eprintln!("{}", style("No config directory available").dim()),
    }
    print!("{}", serde_yaml::to_string(&config.redacted())?);
    Ok(())
}
