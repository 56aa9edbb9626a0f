//! HTTP client for the taxonomy backend's Admin API.
//!
//! Wraps `reqwest` with OAuth client-credentials authentication. A token is
//! acquired when the client is constructed; requests rejected with 401 get
//! one transparent refresh-and-retry (see [`crate::retry`]).

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use tokio::sync::RwLock;

use crate::error::TaxonomyError;
use crate::retry::retry_once_on_unauthorized;
use crate::types::{TokenRequest, TokenResponse};

/// Refresh proactively when a token has less than this many seconds left.
const TOKEN_GRACE_SECS: i64 = 30;

/// Upper bound on the lifetime trusted from a token response.
const MAX_TOKEN_LIFETIME_SECS: i64 = 86_400;

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_expired(&self) -> bool {
        expiry_after(Utc::now(), TOKEN_GRACE_SECS) >= self.expires_at
    }
}

/// `now + expires_in`, with `expires_in` clamped to
/// `0..=MAX_TOKEN_LIFETIME_SECS` so a hostile or broken token response
/// cannot overflow the timestamp.
fn expiry_after(now: DateTime<Utc>, expires_in: i64) -> DateTime<Utc> {
    TimeDelta::try_seconds(expires_in.clamp(0, MAX_TOKEN_LIFETIME_SECS))
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .unwrap_or(now)
}

/// Client for the taxonomy backend.
///
/// Use [`TaxonomyClient::connect`] to build a client and fetch the first
/// access token in one step. Token acquisition failure at this point is the
/// caller's signal that the run cannot proceed.
pub struct TaxonomyClient {
    pub(crate) client: Client,
    pub(crate) base_url: Url,
    client_id: String,
    client_secret: String,
    token: RwLock<CachedToken>,
}

impl TaxonomyClient {
    /// Builds the HTTP client and acquires an access token.
    ///
    /// # Errors
    ///
    /// - [`TaxonomyError::InvalidBaseUrl`] if `base_url` does not parse.
    /// - [`TaxonomyError::Auth`] if the token endpoint rejects the credentials.
    /// - [`TaxonomyError::Http`] on network failure.
    pub async fn connect(
        base_url: &str,
        client_id: &str,
        client_secret: &str,
        timeout_secs: u64,
    ) -> Result<Self, TaxonomyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("catsync/0.1 (category-sync)")
            .build()?;

        let base_url = normalise_base_url(base_url)?;
        let token = request_token(&client, &base_url, client_id, client_secret).await?;

        Ok(Self {
            client,
            base_url,
            client_id: client_id.to_owned(),
            client_secret: client_secret.to_owned(),
            token: RwLock::new(token),
        })
    }

    /// Resolves `path` (e.g. `"api/category"`) against the base URL.
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, TaxonomyError> {
        self.base_url
            .join(path)
            .map_err(|e| TaxonomyError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: format!("cannot join '{path}': {e}"),
            })
    }

    /// Returns the cached token, refreshing first if it is about to expire.
    async fn current_token(&self) -> Result<String, TaxonomyError> {
        {
            let cached = self.token.read().await;
            if !cached.is_expired() {
                return Ok(cached.access_token.clone());
            }
        }
        tracing::debug!("taxonomy token near expiry, refreshing");
        self.refresh_token().await
    }

    async fn refresh_token(&self) -> Result<String, TaxonomyError> {
        let fresh = request_token(
            &self.client,
            &self.base_url,
            &self.client_id,
            &self.client_secret,
        )
        .await?;
        let access_token = fresh.access_token.clone();
        *self.token.write().await = fresh;
        Ok(access_token)
    }

    /// Sends the request produced by `build` with a bearer token, refreshing
    /// the token and resending once if the backend answers 401.
    ///
    /// `build` is invoked once per attempt so the retry gets a fresh builder.
    ///
    /// # Errors
    ///
    /// Returns [`TaxonomyError::Unauthorized`] if the retry is rejected too,
    /// [`TaxonomyError::Auth`] if the refresh fails, or
    /// [`TaxonomyError::Http`] on network failure. Other statuses are
    /// returned to the caller inside `Ok`.
    pub(crate) async fn send_authorized<F>(&self, build: F) -> Result<Response, TaxonomyError>
    where
        F: Fn(&Client) -> RequestBuilder,
    {
        let token = self.current_token().await?;
        retry_once_on_unauthorized(
            token,
            || self.refresh_token(),
            |token| {
                let request = build(&self.client)
                    .bearer_auth(token)
                    .header(reqwest::header::ACCEPT, "application/json");
                async move {
                    let response = request.send().await?;
                    if response.status() == StatusCode::UNAUTHORIZED {
                        return Err(TaxonomyError::Unauthorized {
                            url: response.url().to_string(),
                        });
                    }
                    Ok(response)
                }
            },
        )
        .await
    }

    /// Fails with [`TaxonomyError::UnexpectedStatus`] unless `response` is 2xx.
    pub(crate) async fn ensure_success(response: Response) -> Result<Response, TaxonomyError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let url = response.url().to_string();
        let body = response.text().await.unwrap_or_default();
        Err(TaxonomyError::UnexpectedStatus {
            status: status.as_u16(),
            url,
            body,
        })
    }

    /// Reads the body as text and deserializes it, tagging failures with `context`.
    pub(crate) async fn decode<T>(response: Response, context: &str) -> Result<T, TaxonomyError>
    where
        T: serde::de::DeserializeOwned,
    {
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| TaxonomyError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

/// Ensures the base URL ends with exactly one slash so relative joins append
/// to its path instead of replacing the last segment.
fn normalise_base_url(base_url: &str) -> Result<Url, TaxonomyError> {
    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    Url::parse(&normalised).map_err(|e| TaxonomyError::InvalidBaseUrl {
        base_url: base_url.to_owned(),
        reason: e.to_string(),
    })
}

/// Performs the client-credentials grant against `api/oauth/token`.
async fn request_token(
    client: &Client,
    base_url: &Url,
    client_id: &str,
    client_secret: &str,
) -> Result<CachedToken, TaxonomyError> {
    let url = base_url
        .join("api/oauth/token")
        .map_err(|e| TaxonomyError::InvalidBaseUrl {
            base_url: base_url.to_string(),
            reason: e.to_string(),
        })?;

    let body = TokenRequest {
        grant_type: "client_credentials",
        client_id,
        client_secret,
    };

    let response = client
        .post(url)
        .header(reqwest::header::ACCEPT, "application/json")
        .json(&body)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        return Err(TaxonomyError::Auth(format!(
            "token endpoint returned status {status}: {text}"
        )));
    }

    let text = response.text().await?;
    let parsed: TokenResponse = serde_json::from_str(&text)
        .map_err(|e| TaxonomyError::Auth(format!("malformed token response: {e}")))?;

    if parsed.access_token.is_empty() {
        return Err(TaxonomyError::Auth(
            "token response carried an empty access_token".to_owned(),
        ));
    }

    tracing::debug!(expires_in = parsed.expires_in, "acquired taxonomy access token");

    Ok(CachedToken {
        access_token: parsed.access_token,
        expires_at: expiry_after(Utc::now(), parsed.expires_in),
    })
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
