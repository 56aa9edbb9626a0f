//! Wire types for the taxonomy backend's Admin API.

use catsync_core::{Category, CustomFields};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/oauth/token` for the client-credentials grant.
#[derive(Debug, Serialize)]
pub(crate) struct TokenRequest<'a> {
    pub grant_type: &'static str,
    pub client_id: &'a str,
    pub client_secret: &'a str,
}

fn default_expires_in() -> i64 {
    600
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    /// Lifetime in seconds. The backend issues 10-minute tokens by default.
    #[serde(default = "default_expires_in")]
    pub expires_in: i64,
}

/// One page of `GET /api/category` or `POST /api/search/category`.
#[derive(Debug, Deserialize)]
pub struct CategoryListResponse {
    #[serde(default)]
    pub data: Vec<Category>,
    /// Present on plain `application/json` responses.
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub meta: Option<ListMeta>,
}

impl CategoryListResponse {
    /// The total match count, from the top level or from `meta`.
    #[must_use]
    pub fn reported_total(&self) -> Option<u64> {
        self.total
            .or_else(|| self.meta.as_ref().and_then(|m| m.total))
    }
}

#[derive(Debug, Deserialize)]
pub struct ListMeta {
    /// Total number of matching categories across all pages.
    #[serde(default)]
    pub total: Option<u64>,
}

/// Single-entity envelope of `GET /api/category/{id}`.
#[derive(Debug, Deserialize)]
pub(crate) struct CategoryDetailResponse {
    pub data: Category,
}

/// Body of `PATCH /api/category/{id}`.
#[derive(Debug, Serialize)]
pub(crate) struct PatchCategoryRequest<'a> {
    pub id: &'a str,
    #[serde(rename = "customFields")]
    pub custom_fields: &'a CustomFields,
}
