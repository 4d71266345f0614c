//! Public data types: the authentication result, the user profile snapshot,
//! and the per-call input records.
//!
//! Results serialize with the wire field names the host bindings expect
//! (`idToken`, `photoURL`, ...). Input records are plain parameter bundles
//! with defaulted optional fields; they are never persisted.

use bridge_traits::identity::UserRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The provider a session was established through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    Password,
    Google,
}

impl AuthProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthProvider::Password => "password",
            AuthProvider::Google => "google",
        }
    }
}

impl fmt::Display for AuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of the backend's user record at call time. Never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
    pub email_verified: bool,
    pub is_anonymous: bool,
    pub creation_timestamp: Option<DateTime<Utc>>,
    pub last_sign_in_timestamp: Option<DateTime<Utc>>,
}

impl From<UserRecord> for UserProfile {
    fn from(user: UserRecord) -> Self {
        Self {
            uid: user.uid,
            email: user.email,
            display_name: user.display_name,
            photo_url: user.photo_url,
            email_verified: user.email_verified,
            is_anonymous: user.is_anonymous,
            creation_timestamp: user.created_at,
            last_sign_in_timestamp: user.last_sign_in_at,
        }
    }
}

/// The outcome of every successful sign-in or session fetch.
///
/// `id_token` is always non-empty; an operation that cannot produce one
/// fails instead of returning a partial result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResult {
    pub id_token: String,
    pub provider: AuthProvider,
    pub is_new_user: Option<bool>,
    pub user: UserProfile,
}

/// A bare identity token fetch for the current user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdTokenResult {
    pub id_token: String,
    pub provider: AuthProvider,
}

/// Parameters for email/password sign-in and sign-up.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EmailPasswordInput {
    pub email: String,
    pub password: String,
    pub force_refresh_id_token: bool,
    /// Save the pair to the credential store after a successful
    /// authentication (best-effort).
    pub save_password_credential: bool,
}

impl EmailPasswordInput {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            ..Default::default()
        }
    }
}

impl Default for EmailPasswordInput {
    fn default() -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            force_refresh_id_token: false,
            save_password_credential: true,
        }
    }
}

impl fmt::Debug for EmailPasswordInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailPasswordInput")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("force_refresh_id_token", &self.force_refresh_id_token)
            .field("save_password_credential", &self.save_password_credential)
            .finish()
    }
}

/// Parameters for the explicit, hard-failing credential save.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SavePasswordCredentialInput {
    pub email: String,
    pub password: String,
}

impl SavePasswordCredentialInput {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for SavePasswordCredentialInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SavePasswordCredentialInput")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Parameters for the dedicated Sign in with Google button flow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GoogleButtonInput {
    pub web_client_id: Option<String>,
    pub nonce: Option<String>,
    pub force_refresh_id_token: bool,
}

/// Parameters for the combined bottom-sheet picker flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GoogleBottomSheetInput {
    pub web_client_id: Option<String>,
    pub nonce: Option<String>,
    /// Offer only accounts that previously authorized this app.
    pub filter_by_authorized_accounts: bool,
    pub auto_select_enabled: bool,
    /// Also offer stored password credentials in the same picker.
    pub include_password_option: bool,
    /// When the filtered request finds no credential, retry once with the
    /// authorized-accounts filter disabled.
    pub retry_with_all_google_accounts_on_no_credential: bool,
    pub force_refresh_id_token: bool,
}

impl Default for GoogleBottomSheetInput {
    fn default() -> Self {
        Self {
            web_client_id: None,
            nonce: None,
            filter_by_authorized_accounts: true,
            auto_select_enabled: false,
            include_password_option: true,
            retry_with_all_google_accounts_on_no_credential: true,
            force_refresh_id_token: false,
        }
    }
}

/// Parameters for sign-out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SignOutInput {
    pub clear_credential_state: bool,
}

/// Parameters for deleting the current user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeleteCurrentUserInput {
    pub clear_credential_state: bool,
    /// Attempt an automatic reauthentication when the backend demands a
    /// recent login before deletion.
    pub reauthenticate_if_required: bool,
    pub web_client_id: Option<String>,
    pub nonce: Option<String>,
}

impl Default for DeleteCurrentUserInput {
    fn default() -> Self {
        Self {
            clear_credential_state: true,
            reauthenticate_if_required: true,
            web_client_id: None,
            nonce: None,
        }
    }
}

/// Parameters for reading the current session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CurrentSessionInput {
    pub force_refresh_id_token: bool,
}

/// Parameters for fetching a bare identity token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IdTokenInput {
    pub force_refresh_id_token: bool,
}
