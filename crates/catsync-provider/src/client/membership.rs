//! Collection membership: paged listing and batched append.

use crate::error::ProviderError;
use crate::types::{AppendRequestsBody, MembershipListResponse, MembershipPage, ProductRequest};

use super::{request_info_message, ProviderClient};

/// Message the provider sends, with a 5xx status, when a collection has
/// never had a request added.
pub const EMPTY_COLLECTION_MESSAGE: &str = "Collection has no Requests";

/// Maximum number of membership pages fetched before giving up.
const MAX_PAGES: u32 = 500;

impl ProviderClient {
    /// Fetches one page of `GET collections/{id}/requests/{page}`.
    ///
    /// A server-error status whose `request_info.message` is exactly
    /// [`EMPTY_COLLECTION_MESSAGE`] is returned as
    /// [`MembershipPage::NoRequests`] rather than an error.
    ///
    /// # Errors
    ///
    /// - [`ProviderError::Http`] when no response arrives.
    /// - [`ProviderError::Api`] on any other non-2xx status.
    /// - [`ProviderError::Deserialize`] if the body is not a membership page.
    pub async fn list_membership_page(
        &self,
        collection_id: &str,
        page: u32,
    ) -> Result<MembershipPage, ProviderError> {
        let endpoint = format!("collections/{collection_id}/requests/{page}");
        let url = self.build_url(&endpoint, &[])?;
        let raw = self.execute(self.client.get(url), &endpoint).await?;

        if raw.status.is_server_error() {
            let (_, message) = request_info_message(&raw.body);
            if message.as_deref() == Some(EMPTY_COLLECTION_MESSAGE) {
                return Ok(MembershipPage::NoRequests);
            }
        }

        Self::ensure_success(&raw, &endpoint)?;
        let parsed: MembershipListResponse = Self::decode(&raw, &endpoint)?;
        Ok(MembershipPage::Items {
            requests: parsed.requests,
            total_pages: parsed.requests_page_count,
        })
    }

    /// Lists the product ids stored in a collection across all pages.
    ///
    /// Only requests of type `product` with an ASIN are returned, in listing
    /// order. The "no requests yet" signal yields an empty list.
    ///
    /// **All-or-nothing**: if any page fails, ids from earlier pages are
    /// discarded and the error is returned.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::list_membership_page`].
    pub async fn list_all_member_ids(
        &self,
        collection_id: &str,
    ) -> Result<Vec<String>, ProviderError> {
        let mut ids: Vec<String> = Vec::new();
        let mut page = 1u32;

        loop {
            match self.list_membership_page(collection_id, page).await? {
                MembershipPage::NoRequests => {
                    tracing::debug!(collection_id, page, "collection has no requests");
                    break;
                }
                MembershipPage::Items {
                    requests,
                    total_pages,
                } => {
                    ids.extend(
                        requests
                            .iter()
                            .filter_map(|r| r.product_id().map(str::to_owned)),
                    );
                    if page >= total_pages {
                        break;
                    }
                }
            }

            page += 1;
            if page > MAX_PAGES {
                tracing::warn!(
                    collection_id,
                    max_pages = MAX_PAGES,
                    "membership listing hit the page limit"
                );
                break;
            }
        }

        Ok(ids)
    }

    /// Appends product requests for `asins` to a collection in one call.
    ///
    /// Each entry carries the marketplace domain, language, currency and
    /// postal code from the client's [`catsync_core::MarketplaceConfig`].
    /// Chunking is the caller's job.
    ///
    /// # Errors
    ///
    /// - [`ProviderError::Http`] when no response arrives.
    /// - [`ProviderError::Api`] on a non-2xx status or failed `request_info`.
    pub async fn append_members(
        &self,
        collection_id: &str,
        asins: &[String],
    ) -> Result<(), ProviderError> {
        let endpoint = format!("collections/{collection_id}");
        let url = self.build_url(&endpoint, &[])?;
        let market = &self.marketplace;

        let body = AppendRequestsBody {
            requests: asins
                .iter()
                .map(|asin| ProductRequest {
                    kind: "product",
                    amazon_domain: &market.domain,
                    asin,
                    include_summarization_attributes: "true",
                    include_a_plus_body: "true",
                    language: &market.language,
                    currency: &market.currency,
                    customer_zipcode: &market.customer_zipcode,
                    include_html: "false",
                })
                .collect(),
        };

        let raw = self
            .execute(self.client.put(url).json(&body), &endpoint)
            .await?;
        Self::ensure_success(&raw, &endpoint)
    }
}
