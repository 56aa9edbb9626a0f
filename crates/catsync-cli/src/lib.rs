//! Shared entry points for the `catsync` and `catsync-reset-ids` binaries.

pub mod logging;
pub mod reset;
pub mod sync;

pub use logging::init_tracing;
pub use reset::{reset_collection_ids, ResetSummary};
pub use sync::run_sync;
