//! Marketplace keyword search.

use crate::error::ProviderError;
use crate::types::{SearchResponse, SearchResultItem};

use super::ProviderClient;

impl ProviderClient {
    /// Searches the marketplace for `term`.
    ///
    /// Requests the first page only, organic results only, in the
    /// marketplace's default relevance order (`sort_by=featured`).
    ///
    /// Returns `Ok(None)` when the response has no `search_results` array.
    ///
    /// # Errors
    ///
    /// - [`ProviderError::Http`] when no response arrives.
    /// - [`ProviderError::Api`] on a non-2xx status or failed `request_info`.
    /// - [`ProviderError::Deserialize`] if the body is not JSON.
    pub async fn search(&self, term: &str) -> Result<Option<Vec<SearchResultItem>>, ProviderError> {
        let market = &self.marketplace;
        let url = self.build_url(
            "request",
            &[
                ("type", "search"),
                ("amazon_domain", market.domain.as_str()),
                ("search_term", term),
                ("exclude_sponsored", "true"),
                ("language", market.language.as_str()),
                ("currency", market.currency.as_str()),
                ("customer_zipcode", market.customer_zipcode.as_str()),
                ("output", "json"),
                ("include_html", "false"),
                ("page", "1"),
                ("sort_by", "featured"),
            ],
        )?;
        let raw = self.execute(self.client.get(url), "request").await?;
        Self::ensure_success(&raw, "request")?;
        let parsed: SearchResponse = Self::decode(&raw, &format!("search '{term}'"))?;
        Ok(parsed.search_results)
    }
}
