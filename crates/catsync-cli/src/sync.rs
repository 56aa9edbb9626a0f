//! One full synchronization pass.

use anyhow::Context;
use catsync_core::AppConfig;
use catsync_engine::{SyncEngine, SyncReport};
use catsync_provider::{CollectionSettings, ProviderClient};
use catsync_taxonomy::TaxonomyClient;

/// Authenticates, fetches every category and runs the engine over them.
///
/// # Errors
///
/// Fails when the taxonomy token cannot be acquired, the provider client
/// cannot be built, or a collection cannot be created. Per-category
/// problems are only reported in the returned [`SyncReport`].
pub async fn run_sync(config: &AppConfig) -> anyhow::Result<SyncReport> {
    let taxonomy = TaxonomyClient::connect(
        &config.taxonomy_base_url,
        &config.taxonomy_client_id,
        &config.taxonomy_client_secret,
        config.request_timeout_secs,
    )
    .await
    .context("failed to authenticate against the taxonomy backend")?;

    let provider = ProviderClient::with_base_url(
        &config.provider_api_key,
        config.marketplace.clone(),
        config.request_timeout_secs,
        &config.provider_base_url,
    )
    .context("failed to build provider client")?;

    let categories = taxonomy
        .list_all_categories(config.category_page_size)
        .await;
    tracing::info!(count = categories.len(), "fetched categories");

    let settings = CollectionSettings::with_webhook(config.notification_webhook.clone());
    let engine = SyncEngine::new(&taxonomy, &provider, settings, config.append_chunk_size);
    let report = engine.run(&categories).await?;

    if report.has_failures() {
        tracing::warn!(
            failed = report.failed,
            persist_failures = report.persist_failures,
            membership_failures = report.membership_failures,
            failed_chunks = report.failed_chunks,
            "sync finished with reported failures"
        );
    }
    Ok(report)
}
