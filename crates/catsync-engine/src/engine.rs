//! The per-category sync loop.

use std::collections::HashSet;

use catsync_core::Category;
use catsync_provider::{CollectionSettings, ProviderClient};
use catsync_taxonomy::TaxonomyClient;

use crate::diff::diff_new_items;
use crate::error::{failure_kind, SyncError};
use crate::report::{CategoryOutcome, CategorySync, SkipReason, SyncReport};

/// Largest number of items sent in one membership append.
pub const DEFAULT_CHUNK_SIZE: usize = 1_000;

/// Reconciles categories against provider collections.
///
/// Holds borrowed clients; one engine serves one run.
pub struct SyncEngine<'a> {
    pub(crate) taxonomy: &'a TaxonomyClient,
    pub(crate) provider: &'a ProviderClient,
    pub(crate) settings: CollectionSettings,
    chunk_size: usize,
}

impl<'a> SyncEngine<'a> {
    /// `chunk_size` is clamped to at least 1.
    #[must_use]
    pub fn new(
        taxonomy: &'a TaxonomyClient,
        provider: &'a ProviderClient,
        settings: CollectionSettings,
        chunk_size: usize,
    ) -> Self {
        Self {
            taxonomy,
            provider,
            settings,
            chunk_size: chunk_size.max(1),
        }
    }

    /// Processes every category in order.
    ///
    /// Failures inside one category are logged and counted in the report;
    /// the next category is still processed.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::CollectionCreate`] and stops immediately when a
    /// collection cannot be created.
    pub async fn run(&self, categories: &[Category]) -> Result<SyncReport, SyncError> {
        let mut report = SyncReport::default();

        for category in categories {
            let outcome = self.sync_category(category).await?;
            report.record(&outcome);
        }

        tracing::info!(
            categories = report.categories,
            synced = report.synced,
            skipped = report.skipped,
            failed = report.failed,
            created = report.collections_created,
            appended = report.items_appended,
            "sync pass finished"
        );
        Ok(report)
    }

    /// Runs the full reconcile sequence for a single category.
    ///
    /// # Errors
    ///
    /// Only fatal errors are returned; see [`Self::run`].
    pub async fn sync_category(&self, category: &Category) -> Result<CategoryOutcome, SyncError> {
        let category_id = category.id.as_str();

        if !category.is_collection_managed() {
            tracing::debug!(category_id, "category is not collection-managed, skipping");
            return Ok(CategoryOutcome::Skipped(SkipReason::NotManaged));
        }

        let Some(search_term) = category.effective_search_term() else {
            tracing::warn!(category_id, "category has no search term or name, skipping");
            return Ok(CategoryOutcome::Skipped(SkipReason::NoSearchTerm));
        };

        tracing::info!(category_id, search_term, "syncing category");

        let resolution = match self
            .resolve_collection_id(search_term, category.cached_collection_id())
            .await
        {
            Ok(resolution) => resolution,
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                tracing::error!(category_id, search_term, error = %e, "collection resolution failed");
                return Ok(CategoryOutcome::Failed(e.to_string()));
            }
        };
        let collection_id = resolution.collection_id();

        let persisted = if resolution.needs_persist() {
            self.persist_collection_id(category, collection_id).await
        } else {
            false
        };

        let (existing, membership_listed) = match self.provider.list_all_member_ids(collection_id).await
        {
            Ok(ids) => (ids.into_iter().collect::<HashSet<String>>(), true),
            Err(e) => {
                tracing::warn!(
                    category_id,
                    collection_id,
                    kind = failure_kind(&e),
                    error = %e,
                    "membership listing failed, treating collection as empty"
                );
                (HashSet::new(), false)
            }
        };

        let results = match self.provider.search(search_term).await {
            Ok(Some(results)) => results,
            Ok(None) => {
                tracing::warn!(category_id, search_term, "search returned no result list");
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(
                    category_id,
                    search_term,
                    kind = failure_kind(&e),
                    error = %e,
                    "search failed"
                );
                Vec::new()
            }
        };

        let new_items = diff_new_items(&results, &existing);
        tracing::info!(
            category_id,
            collection_id,
            existing = existing.len(),
            found = results.len(),
            new = new_items.len(),
            "membership diff computed"
        );

        let (appended, failed_chunks) = self.append_in_chunks(collection_id, &new_items).await;

        Ok(CategoryOutcome::Synced(CategorySync {
            resolution,
            persisted,
            existing: existing.len(),
            membership_listed,
            candidates: new_items.len(),
            appended,
            failed_chunks,
        }))
    }

    async fn persist_collection_id(&self, category: &Category, collection_id: &str) -> bool {
        let fields = category.custom_fields_with_collection_id(collection_id);
        match self.taxonomy.patch_metadata(&category.id, &fields).await {
            Ok(()) => {
                tracing::info!(category_id = %category.id, collection_id, "stored collection id on category");
                true
            }
            Err(e) => {
                tracing::error!(
                    category_id = %category.id,
                    collection_id,
                    error = %e,
                    "failed to store collection id on category"
                );
                false
            }
        }
    }

    /// Appends `items` in order, one call per chunk. A failed chunk is logged
    /// and the remaining chunks are still sent.
    ///
    /// Returns `(items appended, chunks failed)`.
    async fn append_in_chunks(&self, collection_id: &str, items: &[String]) -> (usize, usize) {
        let mut appended = 0usize;
        let mut failed = 0usize;

        for (index, chunk) in items.chunks(self.chunk_size).enumerate() {
            match self.provider.append_members(collection_id, chunk).await {
                Ok(()) => {
                    appended += chunk.len();
                    tracing::debug!(collection_id, chunk = index, size = chunk.len(), "chunk appended");
                }
                Err(e) => {
                    failed += 1;
                    tracing::error!(
                        collection_id,
                        chunk = index,
                        size = chunk.len(),
                        kind = failure_kind(&e),
                        error = %e,
                        "membership append failed"
                    );
                }
            }
        }

        (appended, failed)
    }
}
