//! Collection-provider API request and response types.
//!
//! Every response may carry a `request_info` block; on failures it holds a
//! human-readable `message`. Fields the sync job does not read are left out.

use serde::{Deserialize, Serialize};

fn one() -> u32 {
    1
}

/// Status block present on most provider responses.
#[derive(Debug, Default, Deserialize)]
pub struct RequestInfo {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Minimal shape used to pull `request_info` out of any body.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct Envelope {
    #[serde(default)]
    pub request_info: Option<RequestInfo>,
}

// ---------------------------------------------------------------------------
// collections
// ---------------------------------------------------------------------------

/// A collection as listed by `GET collections`.
#[derive(Debug, Clone, Deserialize)]
pub struct Collection {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub requests_count: Option<u64>,
}

/// One page of `GET collections?page=N`.
#[derive(Debug, Deserialize)]
pub struct CollectionListResponse {
    #[serde(default)]
    pub collections: Vec<Collection>,
    /// Absent on single-page results; defaults to 1.
    #[serde(default = "one")]
    pub total_pages: u32,
}

/// `GET collections/{id}`.
#[derive(Debug, Deserialize)]
pub(crate) struct CollectionDetailResponse {
    #[serde(default)]
    pub collection: Option<Collection>,
}

/// Body of `POST collections`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewCollection {
    pub name: String,
    pub enabled: bool,
    pub schedule_type: String,
    pub schedule_days_of_week: String,
    pub schedule_hours: String,
    pub priority: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_webhook: Option<String>,
    pub requests_type: String,
    pub notification_as_json: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreatedCollection {
    #[serde(default)]
    pub id: Option<String>,
}

/// `POST collections` response: `{ "collection": { "id": ... } }`.
#[derive(Debug, Deserialize)]
pub(crate) struct CreateCollectionResponse {
    #[serde(default)]
    pub collection: Option<CreatedCollection>,
}

// ---------------------------------------------------------------------------
// membership (collection "requests")
// ---------------------------------------------------------------------------

/// One stored request inside a collection.
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionRequest {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub asin: Option<String>,
}

impl CollectionRequest {
    /// The item id when this is a `product` request carrying an ASIN.
    #[must_use]
    pub fn product_id(&self) -> Option<&str> {
        match (self.kind.as_deref(), self.asin.as_deref()) {
            (Some("product"), Some(asin)) if !asin.is_empty() => Some(asin),
            _ => None,
        }
    }
}

/// `GET collections/{id}/requests/{page}`.
#[derive(Debug, Deserialize)]
pub(crate) struct MembershipListResponse {
    #[serde(default)]
    pub requests: Vec<CollectionRequest>,
    #[serde(default = "one")]
    pub requests_page_count: u32,
}

/// Outcome of one membership page fetch.
#[derive(Debug)]
pub enum MembershipPage {
    /// A regular page of stored requests.
    Items {
        requests: Vec<CollectionRequest>,
        total_pages: u32,
    },
    /// The provider's "collection has no requests yet" signal.
    NoRequests,
}

/// One entry of the `PUT collections/{id}` body.
#[derive(Debug, Serialize)]
pub(crate) struct ProductRequest<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub amazon_domain: &'a str,
    pub asin: &'a str,
    pub include_summarization_attributes: &'static str,
    pub include_a_plus_body: &'static str,
    pub language: &'a str,
    pub currency: &'a str,
    pub customer_zipcode: &'a str,
    pub include_html: &'static str,
}

#[derive(Debug, Serialize)]
pub(crate) struct AppendRequestsBody<'a> {
    pub requests: Vec<ProductRequest<'a>>,
}

// ---------------------------------------------------------------------------
// search
// ---------------------------------------------------------------------------

/// One organic search hit.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResultItem {
    #[serde(default)]
    pub asin: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub position: Option<u32>,
    #[serde(default)]
    pub link: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub search_results: Option<Vec<SearchResultItem>>,
}
