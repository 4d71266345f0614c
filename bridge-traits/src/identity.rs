//! Identity Backend Abstraction
//!
//! The remote authentication service behind every sign-in: it verifies
//! email/password pairs or Google ID tokens, keeps the ambient signed-in
//! user, mints short-lived identity tokens, and supports reauthentication
//! and account deletion. Implementations wrap the vendor SDK; the core never
//! talks to the network itself.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::IdentityError;

/// Provider identifier the backend reports for accounts linked through
/// Google sign-in.
pub const GOOGLE_PROVIDER_ID: &str = "google.com";

/// Provider identifier the backend reports for email/password accounts.
pub const EMAIL_PROVIDER_ID: &str = "password";

/// The backend's view of a user account at a point in time.
///
/// Re-read on every request; this layer never caches it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
    pub email_verified: bool,
    pub is_anonymous: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub last_sign_in_at: Option<DateTime<Utc>>,
    /// Identifiers of the providers linked to this account
    /// (e.g. [`GOOGLE_PROVIDER_ID`], [`EMAIL_PROVIDER_ID`]).
    pub provider_ids: Vec<String>,
}

/// The result of a successful sign-in or sign-up call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInOutcome {
    pub user: UserRecord,
    /// Whether the backend created the account during this call. `None` when
    /// the backend did not report it.
    pub is_new_user: Option<bool>,
}

/// Remote identity service trait
///
/// The backend owns an ambient "current user" session: a successful sign-in
/// replaces it, [`sign_out`](IdentityBackend::sign_out) clears it, and
/// [`current_user`](IdentityBackend::current_user) reads it. Token and
/// deletion calls operate on that ambient user.
#[async_trait]
pub trait IdentityBackend: Send + Sync {
    /// Authenticate an existing account with an email/password pair.
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<SignInOutcome, IdentityError>;

    /// Create a new account from an email/password pair and sign it in.
    async fn create_user_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<SignInOutcome, IdentityError>;

    /// Exchange a Google ID token for a backend session.
    async fn sign_in_with_google_id_token(
        &self,
        id_token: &str,
    ) -> Result<SignInOutcome, IdentityError>;

    /// The ambient signed-in user, if any.
    async fn current_user(&self) -> Option<UserRecord>;

    /// Mint an identity token for the current user.
    ///
    /// Returns `Ok(None)` when the backend has no token to hand out even
    /// though the call itself succeeded.
    async fn id_token(&self, force_refresh: bool) -> Result<Option<String>, IdentityError>;

    /// Re-prove the current user's identity with an email/password pair.
    async fn reauthenticate_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(), IdentityError>;

    /// Re-prove the current user's identity with a Google ID token.
    async fn reauthenticate_with_google_id_token(
        &self,
        id_token: &str,
    ) -> Result<(), IdentityError>;

    /// Delete the current user's account.
    ///
    /// Fails with [`IdentityError::RecentLoginRequired`] when the session is
    /// too old for a sensitive operation.
    async fn delete_current_user(&self) -> Result<(), IdentityError>;

    /// Drop the ambient session. Never fails.
    async fn sign_out(&self);
}
