use thiserror::Error;

/// Errors returned by the taxonomy (commerce backend) client.
#[derive(Debug, Error)]
pub enum TaxonomyError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The OAuth token endpoint refused the client credentials or returned
    /// a body without an access token.
    #[error("token acquisition failed: {0}")]
    Auth(String),

    /// The backend answered 401 for a request made with a fresh token.
    #[error("unauthorized request to {url}")]
    Unauthorized { url: String },

    #[error("unexpected HTTP status {status} from {url}: {body}")]
    UnexpectedStatus {
        status: u16,
        url: String,
        body: String,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{base_url}': {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
