//! HTTP client for the collection-provider API.
//!
//! Every call carries the static API key as an `api_key` query parameter.
//! The client never retries: each method makes exactly one request per page
//! and reports transport failures as [`ProviderError::Http`].

mod collections;
mod membership;
mod search;

use std::time::Duration;

use catsync_core::MarketplaceConfig;
use reqwest::{Client, RequestBuilder, StatusCode, Url};

use crate::error::ProviderError;
use crate::types::Envelope;

pub use membership::EMPTY_COLLECTION_MESSAGE;

const DEFAULT_BASE_URL: &str = "https://api.rainforestapi.com/";

/// Client for the collection-provider API.
///
/// Use [`ProviderClient::new`] for production or
/// [`ProviderClient::with_base_url`] to point at a mock server in tests.
pub struct ProviderClient {
    client: Client,
    api_key: String,
    base_url: Url,
    marketplace: MarketplaceConfig,
}

/// Status and raw body of a completed request.
pub(crate) struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ProviderClient {
    /// Creates a client pointed at the production provider API.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: &str,
        marketplace: MarketplaceConfig,
        timeout_secs: u64,
    ) -> Result<Self, ProviderError> {
        Self::with_base_url(api_key, marketplace, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ProviderError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        marketplace: MarketplaceConfig,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("catsync/0.1 (category-sync)")
            .build()?;

        // Exactly one trailing slash so joined paths append instead of
        // replacing the last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ProviderError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            marketplace,
        })
    }

    /// Builds `base_url/path?api_key=...&k=v...` with percent-encoded values.
    fn build_url(&self, path: &str, extra: &[(&str, &str)]) -> Result<Url, ProviderError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| ProviderError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: format!("cannot join '{path}': {e}"),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("api_key", &self.api_key);
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Sends `request` and reads the whole body, whatever the status.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] when no response arrives or the body
    /// cannot be read.
    async fn execute(
        &self,
        request: RequestBuilder,
        endpoint: &str,
    ) -> Result<RawResponse, ProviderError> {
        let response = request.send().await.map_err(|e| {
            tracing::debug!(endpoint, error = %e, "provider request got no response");
            ProviderError::Http(e.without_url())
        })?;
        let status = response.status();
        let body = response.text().await.map_err(reqwest::Error::without_url)?;
        Ok(RawResponse { status, body })
    }

    /// Fails with [`ProviderError::Api`] unless the response is 2xx and its
    /// `request_info.success` is not `false`.
    fn ensure_success(raw: &RawResponse, endpoint: &str) -> Result<(), ProviderError> {
        let info = request_info_message(&raw.body);
        let flagged_failure = info.0 == Some(false);
        if raw.status.is_success() && !flagged_failure {
            return Ok(());
        }
        Err(ProviderError::Api {
            status: raw.status.as_u16(),
            endpoint: endpoint.to_owned(),
            message: info.1,
        })
    }

    fn decode<T>(raw: &RawResponse, context: &str) -> Result<T, ProviderError>
    where
        T: serde::de::DeserializeOwned,
    {
        serde_json::from_str(&raw.body).map_err(|e| ProviderError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

/// Extracts `(request_info.success, request_info.message)` from a body,
/// tolerating bodies that are not JSON at all.
pub(crate) fn request_info_message(body: &str) -> (Option<bool>, Option<String>) {
    serde_json::from_str::<Envelope>(body)
        .ok()
        .and_then(|e| e.request_info)
        .map_or((None, None), |info| (info.success, info.message))
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
