//! Collection resolution: cached id, name scan, or create.

use crate::engine::SyncEngine;
use crate::error::{failure_kind, SyncError};

/// Maximum number of collection-list pages scanned for a name.
const MAX_SCAN_PAGES: u32 = 1_000;

/// How a category's collection id was determined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The id cached on the category was kept.
    Cached(String),
    /// An existing collection with the exact name was found.
    Found(String),
    /// No collection had the name, so one was created.
    Created(String),
}

impl Resolution {
    #[must_use]
    pub fn collection_id(&self) -> &str {
        match self {
            Resolution::Cached(id) | Resolution::Found(id) | Resolution::Created(id) => id,
        }
    }

    /// `true` when the id differs from what the category already holds.
    #[must_use]
    pub fn needs_persist(&self) -> bool {
        !matches!(self, Resolution::Cached(_))
    }
}

impl SyncEngine<'_> {
    /// Determines the collection id for `name`.
    ///
    /// With a `cached_id`, the collection is looked up directly. The cached id
    /// is kept unless the provider answers 404 for it; a transport failure or
    /// other error keeps it too. A name that no longer matches is only
    /// logged. Without a usable cached id, collection pages
    /// are scanned in order for an exact, case-sensitive name match, and the
    /// first match wins. If no page matches, a collection is created.
    ///
    /// # Errors
    ///
    /// - [`SyncError::CollectionLookup`] if a collection page fails during the
    ///   scan. Nothing is created in that case.
    /// - [`SyncError::CollectionCreate`] if creation fails or yields no id.
    ///   This one is fatal to the run.
    pub async fn resolve_collection_id(
        &self,
        name: &str,
        cached_id: Option<&str>,
    ) -> Result<Resolution, SyncError> {
        if let Some(cached) = cached_id {
            match self.provider.get_collection(cached).await {
                Ok(collection) => {
                    if collection.name != name {
                        tracing::warn!(
                            collection_id = cached,
                            collection_name = %collection.name,
                            search_term = name,
                            "cached collection name differs from search term, keeping cached id"
                        );
                    }
                    return Ok(Resolution::Cached(cached.to_owned()));
                }
                Err(e) if e.is_not_found() => {
                    tracing::warn!(
                        collection_id = cached,
                        search_term = name,
                        "cached collection id is stale, resolving by name"
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        collection_id = cached,
                        kind = failure_kind(&e),
                        error = %e,
                        "could not verify cached collection id, keeping it"
                    );
                    return Ok(Resolution::Cached(cached.to_owned()));
                }
            }
        }

        if let Some(id) = self.find_collection_by_name(name).await? {
            tracing::info!(collection_id = %id, search_term = name, "found collection by name");
            return Ok(Resolution::Found(id));
        }

        let body = self.settings.new_collection(name);
        let id = self
            .provider
            .create_collection(&body)
            .await
            .map_err(|source| SyncError::CollectionCreate {
                name: name.to_owned(),
                source,
            })?;
        tracing::info!(collection_id = %id, search_term = name, "created collection");
        Ok(Resolution::Created(id))
    }

    async fn find_collection_by_name(&self, name: &str) -> Result<Option<String>, SyncError> {
        let mut page = 1u32;

        while page <= MAX_SCAN_PAGES {
            let listing = self
                .provider
                .list_collections_page(page)
                .await
                .map_err(|source| SyncError::CollectionLookup {
                    name: name.to_owned(),
                    page,
                    source,
                })?;

            if let Some(hit) = listing.collections.into_iter().find(|c| c.name == name) {
                return Ok(Some(hit.id));
            }
            if page >= listing.total_pages {
                return Ok(None);
            }
            page += 1;
        }

        tracing::warn!(
            search_term = name,
            max_pages = MAX_SCAN_PAGES,
            "collection name scan hit the page limit"
        );
        Ok(None)
    }
}
