use thiserror::Error;

/// Errors returned by the collection-provider client.
///
/// [`ProviderError::Http`] means no usable response arrived (connect
/// failure, timeout, TLS); [`ProviderError::Api`] means the provider answered
/// with an error payload. Callers rely on that split to tell transport
/// trouble from a definite refusal.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider returned status {status} for {endpoint}: {}", .message.as_deref().unwrap_or("no message"))]
    Api {
        status: u16,
        endpoint: String,
        message: Option<String>,
    },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("collection '{name}' was not assigned an id by the provider")]
    MissingCollectionId { name: String },

    #[error("invalid base URL '{base_url}': {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

impl ProviderError {
    /// `true` when the failure happened before any response was received.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, ProviderError::Http(_))
    }

    /// `true` when the provider answered 404.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, ProviderError::Api { status: 404, .. })
    }
}
