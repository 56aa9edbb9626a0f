//! Category endpoints: paginated listing, filtered search, metadata patch.

use catsync_core::{Category, CustomFields, COLLECTION_ID_KEY};

use crate::client::TaxonomyClient;
use crate::error::TaxonomyError;
use crate::types::{CategoryDetailResponse, CategoryListResponse, PatchCategoryRequest};

/// Upper bound on pages fetched by one listing, guarding against a `total`
/// that never converges.
const MAX_PAGES: u32 = 1_000;

impl TaxonomyClient {
    /// Fetches one page of `GET /api/category`.
    ///
    /// # Errors
    ///
    /// - [`TaxonomyError::Http`] on network failure.
    /// - [`TaxonomyError::Unauthorized`] if a refreshed token is rejected.
    /// - [`TaxonomyError::UnexpectedStatus`] on any other non-2xx status.
    /// - [`TaxonomyError::Deserialize`] if the body is not a category page.
    pub async fn list_categories_page(
        &self,
        page: u32,
        limit: u32,
    ) -> Result<CategoryListResponse, TaxonomyError> {
        let url = self.endpoint("api/category")?;
        let response = self
            .send_authorized(|client| {
                client
                    .get(url.clone())
                    .query(&[("limit", limit), ("page", page), ("total-count-mode", 1)])
            })
            .await?;
        let response = Self::ensure_success(response).await?;
        Self::decode(response, &format!("category list page {page}")).await
    }

    /// Fetches every category, page by page, before returning.
    ///
    /// Paging stops once the number collected reaches the reported total
    /// (top-level `total` or `meta.total`), or, when no total is reported,
    /// at the first page shorter than `page_size`. An empty page always
    /// ends the listing. A failing page ends the listing and the categories
    /// gathered so far are returned as-is; the failure is logged.
    pub async fn list_all_categories(&self, page_size: u32) -> Vec<Category> {
        let mut categories: Vec<Category> = Vec::new();
        let mut page = 1u32;

        loop {
            if page > MAX_PAGES {
                tracing::warn!(
                    max_pages = MAX_PAGES,
                    collected = categories.len(),
                    "category listing hit the page limit, using partial list"
                );
                break;
            }

            let response = match self.list_categories_page(page, page_size).await {
                Ok(response) => response,
                Err(e) => {
                    tracing::error!(
                        page,
                        collected = categories.len(),
                        error = %e,
                        "failed to list categories, using partial list"
                    );
                    break;
                }
            };

            let fetched = response.data.len();
            let total = response.reported_total();
            categories.extend(response.data);

            if !has_more_pages(fetched, categories.len(), total, page_size) {
                break;
            }
            page += 1;
        }

        tracing::info!(count = categories.len(), "listed categories");
        categories
    }

    /// Fetches one category by id.
    ///
    /// # Errors
    ///
    /// Same as [`Self::list_categories_page`].
    pub async fn get_category(&self, category_id: &str) -> Result<Category, TaxonomyError> {
        let url = self.endpoint(&format!("api/category/{category_id}"))?;
        let response = self
            .send_authorized(|client| client.get(url.clone()))
            .await?;
        let response = Self::ensure_success(response).await?;
        let envelope: CategoryDetailResponse =
            Self::decode(response, &format!("category {category_id}")).await?;
        Ok(envelope.data)
    }

    /// Replaces the custom-field mapping of one category.
    ///
    /// The caller passes the complete mapping, built from the category's
    /// current fields so unrelated keys survive the write.
    ///
    /// # Errors
    ///
    /// - [`TaxonomyError::Http`] on network failure.
    /// - [`TaxonomyError::Unauthorized`] if a refreshed token is rejected.
    /// - [`TaxonomyError::UnexpectedStatus`] on any non-2xx status.
    pub async fn patch_metadata(
        &self,
        category_id: &str,
        custom_fields: &CustomFields,
    ) -> Result<(), TaxonomyError> {
        let url = self.endpoint(&format!("api/category/{category_id}"))?;
        let body = PatchCategoryRequest {
            id: category_id,
            custom_fields,
        };
        let response = self
            .send_authorized(|client| client.patch(url.clone()).json(&body))
            .await?;
        Self::ensure_success(response).await?;
        tracing::debug!(category_id, "patched category custom fields");
        Ok(())
    }

    /// Lists categories whose cached collection id is neither null nor empty,
    /// via `POST /api/search/category`.
    ///
    /// Unlike [`Self::list_all_categories`], a failing page is an error: the
    /// caller is about to mutate what this returns and must not act on a
    /// silently truncated list.
    ///
    /// # Errors
    ///
    /// Same as [`Self::list_categories_page`].
    pub async fn list_categories_with_collection_id(
        &self,
        page_size: u32,
    ) -> Result<Vec<Category>, TaxonomyError> {
        let url = self.endpoint("api/search/category")?;
        let field = format!("customFields.{COLLECTION_ID_KEY}");
        let mut categories: Vec<Category> = Vec::new();
        let mut page = 1u32;

        while page <= MAX_PAGES {
            let body = serde_json::json!({
                "page": page,
                "limit": page_size,
                "total-count-mode": 1,
                "filter": [{
                    "type": "not",
                    "operator": "or",
                    "queries": [
                        { "type": "equals", "field": field, "value": null },
                        { "type": "equals", "field": field, "value": "" }
                    ]
                }]
            });
            let response = self
                .send_authorized(|client| client.post(url.clone()).json(&body))
                .await?;
            let response = Self::ensure_success(response).await?;
            let parsed: CategoryListResponse =
                Self::decode(response, &format!("category search page {page}")).await?;

            let fetched = parsed.data.len();
            let total = parsed.reported_total();
            categories.extend(parsed.data);

            if !has_more_pages(fetched, categories.len(), total, page_size) {
                break;
            }
            page += 1;
        }

        Ok(categories)
    }
}

/// Decides whether to request the page after one that returned `fetched`
/// rows. With a reported total, paging runs until `collected` reaches it;
/// without one, a full page means more may follow.
fn has_more_pages(fetched: usize, collected: usize, total: Option<u64>, page_size: u32) -> bool {
    if fetched == 0 {
        return false;
    }
    match total {
        Some(total) => u64::try_from(collected).unwrap_or(u64::MAX) < total,
        None => fetched >= usize::try_from(page_size).unwrap_or(usize::MAX),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reported_total_bounds_paging() {
        assert!(has_more_pages(2, 2, Some(3), 2));
        assert!(!has_more_pages(1, 3, Some(3), 2));
    }

    #[test]
    fn full_page_without_total_requests_another() {
        assert!(has_more_pages(500, 500, None, 500));
        assert!(!has_more_pages(499, 999, None, 500));
    }

    #[test]
    fn empty_page_always_ends_paging() {
        assert!(!has_more_pages(0, 2, Some(10), 2));
        assert!(!has_more_pages(0, 0, None, 2));
    }
}
