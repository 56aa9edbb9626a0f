//! Clears cached collection ids so the next sync resolves every category
//! from scratch.

use anyhow::Context;
use catsync_core::{AppConfig, COLLECTION_ID_KEY};
use catsync_taxonomy::TaxonomyClient;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ResetSummary {
    pub found: usize,
    pub cleared: usize,
    pub failed: usize,
}

/// Sets `collection_id` to `""` on every category that has one.
///
/// Each category is re-read before the patch to log its current value and
/// after it to confirm the id is gone. A failed read, patch or confirmation
/// is logged and counted; the remaining categories are still processed.
///
/// # Errors
///
/// Fails only when the token cannot be acquired or the category search
/// fails.
pub async fn reset_collection_ids(config: &AppConfig) -> anyhow::Result<ResetSummary> {
    let taxonomy = TaxonomyClient::connect(
        &config.taxonomy_base_url,
        &config.taxonomy_client_id,
        &config.taxonomy_client_secret,
        config.request_timeout_secs,
    )
    .await
    .context("failed to authenticate against the taxonomy backend")?;

    let categories = taxonomy
        .list_categories_with_collection_id(config.category_page_size)
        .await
        .context("failed to search categories with a collection id")?;

    let mut summary = ResetSummary {
        found: categories.len(),
        ..ResetSummary::default()
    };
    tracing::info!(count = summary.found, "categories with a collection id");

    for listed in &categories {
        if reset_one(&taxonomy, &listed.id).await {
            summary.cleared += 1;
        } else {
            summary.failed += 1;
        }
    }

    Ok(summary)
}

/// Reads, clears and re-reads one category. Returns `true` once the
/// confirmation read shows no collection id.
async fn reset_one(taxonomy: &TaxonomyClient, category_id: &str) -> bool {
    let before = match taxonomy.get_category(category_id).await {
        Ok(category) => category,
        Err(e) => {
            tracing::error!(category_id, error = %e, "failed to read category before reset");
            return false;
        }
    };
    let current = before
        .custom_fields
        .as_ref()
        .and_then(|fields| fields.get(COLLECTION_ID_KEY));
    tracing::info!(category_id, current = ?current, "clearing collection id");

    let fields = before.custom_fields_with_collection_id("");
    if let Err(e) = taxonomy.patch_metadata(category_id, &fields).await {
        tracing::error!(category_id, error = %e, "failed to clear collection id");
        return false;
    }

    match taxonomy.get_category(category_id).await {
        Ok(after) => match after.cached_collection_id() {
            None => {
                tracing::info!(category_id, "collection id cleared");
                true
            }
            Some(still) => {
                tracing::error!(category_id, collection_id = still, "collection id still set after reset");
                false
            }
        },
        Err(e) => {
            tracing::error!(category_id, error = %e, "failed to confirm collection id reset");
            false
        }
    }
}
