pub mod client;
pub mod error;
pub mod schedule;
pub mod types;

pub use client::{ProviderClient, EMPTY_COLLECTION_MESSAGE};
pub use error::ProviderError;
pub use schedule::CollectionSettings;
pub use types::{
    Collection, CollectionListResponse, CollectionRequest, MembershipPage, NewCollection,
    SearchResultItem,
};
