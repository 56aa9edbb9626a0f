//! One-shot token refresh for requests rejected with 401.
//!
//! [`retry_once_on_unauthorized`] runs an operation with the current token.
//! If the backend rejects it as [`TaxonomyError::Unauthorized`], a fresh
//! token is fetched and the operation is attempted exactly once more. Every
//! other outcome is returned unchanged.

use std::future::Future;

use crate::error::TaxonomyError;

/// Returns `true` for errors that a new access token may fix.
pub(crate) fn is_unauthorized(err: &TaxonomyError) -> bool {
    matches!(err, TaxonomyError::Unauthorized { .. })
}

/// Runs `operation` with `token`; on 401 calls `refresh` and retries once.
///
/// A second 401 and any refresh failure are returned as-is. No back-off is
/// applied: the retry happens immediately with the new token.
pub(crate) async fn retry_once_on_unauthorized<T, Op, OpFut, Refresh, RefreshFut>(
    token: String,
    refresh: Refresh,
    mut operation: Op,
) -> Result<T, TaxonomyError>
where
    Op: FnMut(String) -> OpFut,
    OpFut: Future<Output = Result<T, TaxonomyError>>,
    Refresh: FnOnce() -> RefreshFut,
    RefreshFut: Future<Output = Result<String, TaxonomyError>>,
{
    match operation(token).await {
        Err(err) if is_unauthorized(&err) => {
            tracing::warn!(error = %err, "taxonomy token rejected, refreshing and retrying once");
            let fresh = refresh().await?;
            operation(fresh).await
        }
        other => other,
    }
}
