pub mod categories;
pub mod client;
pub mod error;
pub(crate) mod retry;
pub mod types;

pub use client::TaxonomyClient;
pub use error::TaxonomyError;
pub use types::{CategoryListResponse, ListMeta};
