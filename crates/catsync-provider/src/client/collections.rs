//! Collection list, lookup and create endpoints.

use crate::error::ProviderError;
use crate::types::{
    Collection, CollectionDetailResponse, CollectionListResponse, CreateCollectionResponse,
    NewCollection,
};

use super::ProviderClient;

impl ProviderClient {
    /// Fetches one page of `GET collections` (provider-default page size).
    ///
    /// # Errors
    ///
    /// - [`ProviderError::Http`] when no response arrives.
    /// - [`ProviderError::Api`] on a non-2xx status or failed `request_info`.
    /// - [`ProviderError::Deserialize`] if the body is not a collection page.
    pub async fn list_collections_page(
        &self,
        page: u32,
    ) -> Result<CollectionListResponse, ProviderError> {
        let page_str = page.to_string();
        let url = self.build_url("collections", &[("page", &page_str)])?;
        let raw = self.execute(self.client.get(url), "collections").await?;
        Self::ensure_success(&raw, "collections")?;
        Self::decode(&raw, &format!("collections page {page}"))
    }

    /// Fetches a single collection by id.
    ///
    /// # Errors
    ///
    /// - [`ProviderError::Api`] with status 404 when the id is unknown.
    /// - Otherwise as [`Self::list_collections_page`].
    pub async fn get_collection(&self, collection_id: &str) -> Result<Collection, ProviderError> {
        let endpoint = format!("collections/{collection_id}");
        let url = self.build_url(&endpoint, &[])?;
        let raw = self.execute(self.client.get(url), &endpoint).await?;
        Self::ensure_success(&raw, &endpoint)?;
        let parsed: CollectionDetailResponse = Self::decode(&raw, &endpoint)?;
        parsed.collection.ok_or_else(|| ProviderError::Api {
            status: 404,
            endpoint,
            message: Some("response carried no collection".to_owned()),
        })
    }

    /// Creates a collection and returns the provider-assigned id.
    ///
    /// # Errors
    ///
    /// - [`ProviderError::MissingCollectionId`] if the response has no id.
    /// - Otherwise as [`Self::list_collections_page`].
    pub async fn create_collection(&self, body: &NewCollection) -> Result<String, ProviderError> {
        let url = self.build_url("collections", &[])?;
        let raw = self
            .execute(self.client.post(url).json(body), "collections")
            .await?;
        Self::ensure_success(&raw, "collections")?;
        let parsed: CreateCollectionResponse = Self::decode(&raw, "create collection")?;

        parsed
            .collection
            .and_then(|c| c.id)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ProviderError::MissingCollectionId {
                name: body.name.clone(),
            })
    }
}
