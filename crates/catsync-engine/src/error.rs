use catsync_provider::ProviderError;
use thiserror::Error;

/// Errors raised while reconciling a category.
///
/// Only [`SyncError::CollectionCreate`] stops a run; every other variant is
/// reported against the category and the run moves on.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Creating a collection failed or returned no id. Proceeding would mean
    /// syncing into a target that cannot be named.
    #[error("failed to create collection '{name}': {source}")]
    CollectionCreate {
        name: String,
        #[source]
        source: ProviderError,
    },

    /// A page of the collection listing failed during the name scan.
    #[error("collection lookup for '{name}' failed on page {page}: {source}")]
    CollectionLookup {
        name: String,
        page: u32,
        #[source]
        source: ProviderError,
    },
}

impl SyncError {
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, SyncError::CollectionCreate { .. })
    }
}

/// Log label separating "no response" from an error answer.
pub(crate) fn failure_kind(err: &ProviderError) -> &'static str {
    if err.is_transport() {
        "transport"
    } else {
        "api"
    }
}
