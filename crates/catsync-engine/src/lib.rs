//! Category-to-collection reconciliation.
//!
//! [`SyncEngine::run`] walks the category list once, in order, and for each
//! collection-managed category resolves (or creates) its provider collection,
//! diffs a fresh marketplace search against the collection's membership and
//! appends only the new items in bounded chunks.

pub mod diff;
pub mod engine;
pub mod error;
pub mod report;
pub mod resolve;

pub use diff::diff_new_items;
pub use engine::{SyncEngine, DEFAULT_CHUNK_SIZE};
pub use error::SyncError;
pub use report::{CategoryOutcome, CategorySync, SkipReason, SyncReport};
pub use resolve::Resolution;
