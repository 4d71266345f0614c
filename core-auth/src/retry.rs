//! Single-retry credential retrieval.
//!
//! Both the bottom-sheet sign-in and the Google reauthentication branch use
//! the same fallback: when a request filtered to previously-authorized
//! accounts finds no credential, retry exactly once with the filter
//! relaxed. The retry's error wins over the original one.

use bridge_traits::credentials::{Credential, CredentialRequest, CredentialStore};
use bridge_traits::error::CredentialStoreError;

/// Attempt `first`; on [`CredentialStoreError::NoCredential`], when
/// `retry_on_no_credential` is set, attempt `relaxed` once. No other error
/// kind triggers the retry, and the retry is never repeated.
pub(crate) async fn get_with_relaxed_retry(
    store: &dyn CredentialStore,
    first: CredentialRequest,
    relaxed: CredentialRequest,
    retry_on_no_credential: bool,
) -> Result<Credential, CredentialStoreError> {
    match store.get_credential(first).await {
        Err(CredentialStoreError::NoCredential(_)) if retry_on_no_credential => {
            store.get_credential(relaxed).await
        }
        other => other,
    }
}
