//! Credential Store Abstraction
//!
//! Provides the platform-agnostic contract for the system credential manager:
//! retrieving stored credentials behind a system picker, saving password
//! credentials, and clearing credential state. Implementations wrap the
//! platform facility (Credential Manager on Android, Keychain-backed flows
//! elsewhere); hosts without one report unsupported through
//! [`HostSurface`](crate::host::HostSurface) instead of implementing this
//! trait partially.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CredentialStoreError, GoogleIdTokenParseError};

/// Credential type tag for a Google ID token obtained from a bottom-sheet
/// style picker.
pub const GOOGLE_ID_TOKEN_CREDENTIAL_TYPE: &str =
    "com.google.android.libraries.identity.googleid.TYPE_GOOGLE_ID_TOKEN_CREDENTIAL";

/// Credential type tag for a Google ID token obtained from the dedicated
/// Sign in with Google button flow.
pub const GOOGLE_ID_TOKEN_SIWG_CREDENTIAL_TYPE: &str =
    "com.google.android.libraries.identity.googleid.TYPE_GOOGLE_ID_TOKEN_SIWG_CREDENTIAL";

/// A stored password credential. `id` carries the account identifier, which
/// for this layer is always an email address.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordCredential {
    pub id: String,
    pub password: String,
}

// Custom Debug implementation to avoid logging passwords
impl fmt::Debug for PasswordCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordCredential")
            .field("id", &self.id)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// A provider-defined credential envelope: a type tag plus opaque payload.
///
/// This layer only understands the two Google ID token envelope types; every
/// other tag is passed through untouched and rejected by the orchestration
/// layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomCredential {
    pub credential_type: String,
    pub data: serde_json::Value,
}

impl CustomCredential {
    /// Whether the envelope carries one of the recognized Google ID token
    /// credential types.
    pub fn is_google_id_token(&self) -> bool {
        self.credential_type == GOOGLE_ID_TOKEN_CREDENTIAL_TYPE
            || self.credential_type == GOOGLE_ID_TOKEN_SIWG_CREDENTIAL_TYPE
    }
}

/// A credential returned by the store's system picker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Credential {
    /// A stored email/password pair.
    Password(PasswordCredential),
    /// A provider-defined envelope (Google ID tokens land here).
    Custom(CustomCredential),
    /// A platform credential kind this layer does not handle (e.g. passkeys).
    Other { credential_type: String },
}

impl Credential {
    /// Human-oriented description of the credential kind, used in error
    /// messages when an unexpected variant shows up.
    pub fn type_name(&self) -> &str {
        match self {
            Credential::Password(_) => "PasswordCredential",
            Credential::Custom(custom) => &custom.credential_type,
            Credential::Other { credential_type } => credential_type,
        }
    }
}

/// A Google ID token credential decoded from a [`CustomCredential`] payload.
///
/// Mirrors the fields the identity SDK packs into the envelope. Only
/// `id_token` is required; the remaining fields are informational.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoogleIdTokenCredential {
    pub id_token: String,
    pub id: Option<String>,
    pub display_name: Option<String>,
    pub profile_picture_uri: Option<String>,
}

impl GoogleIdTokenCredential {
    /// Decode the opaque payload of a Google ID token envelope.
    ///
    /// The payload must be a JSON object with a non-empty string `id_token`
    /// field. Missing or malformed payloads fail with
    /// [`GoogleIdTokenParseError`]; the caller decides how that surfaces.
    pub fn from_envelope(
        data: &serde_json::Value,
    ) -> Result<Self, GoogleIdTokenParseError> {
        let object = data
            .as_object()
            .ok_or_else(|| GoogleIdTokenParseError("credential data is not an object".into()))?;

        let id_token = object
            .get("id_token")
            .and_then(|value| value.as_str())
            .ok_or_else(|| GoogleIdTokenParseError("id_token field is missing".into()))?;
        if id_token.is_empty() {
            return Err(GoogleIdTokenParseError("id_token field is empty".into()));
        }

        let string_field = |key: &str| {
            object
                .get(key)
                .and_then(|value| value.as_str())
                .map(|s| s.to_string())
        };

        Ok(Self {
            id_token: id_token.to_string(),
            id: string_field("id"),
            display_name: string_field("display_name"),
            profile_picture_uri: string_field("profile_picture_uri"),
        })
    }
}

// Custom Debug implementation to avoid logging tokens
impl fmt::Debug for GoogleIdTokenCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleIdTokenCredential")
            .field("id_token", &"[REDACTED]")
            .field("id", &self.id)
            .field("display_name", &self.display_name)
            .field("profile_picture_uri", &self.profile_picture_uri)
            .finish()
    }
}

/// Parameters for a Google ID option in a combined (bottom-sheet) picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoogleIdOption {
    /// The server/web OAuth client the issued token must be addressed to.
    pub server_client_id: String,
    pub nonce: Option<String>,
    /// Restrict the picker to accounts that previously authorized this app.
    pub filter_by_authorized_accounts: bool,
    /// Let the platform auto-select when exactly one account matches.
    pub auto_select_enabled: bool,
}

/// Parameters for the dedicated Sign in with Google button flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInWithGoogleOption {
    pub server_client_id: String,
    pub nonce: Option<String>,
    pub hosted_domain_filter: Option<String>,
}

/// One credential kind offered by a retrieval request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CredentialOption {
    Password,
    GoogleId(GoogleIdOption),
    SignInWithGoogle(SignInWithGoogleOption),
}

/// A credential retrieval request: the set of credential kinds the system
/// picker should offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRequest {
    pub options: Vec<CredentialOption>,
}

impl CredentialRequest {
    pub fn new(options: Vec<CredentialOption>) -> Self {
        Self { options }
    }

    /// A request offering a single credential kind.
    pub fn single(option: CredentialOption) -> Self {
        Self {
            options: vec![option],
        }
    }
}

/// A request to persist a password credential in the store.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePasswordRequest {
    pub id: String,
    pub password: String,
}

impl fmt::Debug for CreatePasswordRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreatePasswordRequest")
            .field("id", &self.id)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Platform credential manager trait
///
/// All operations may present system UI and therefore require a foreground
/// surface; callers check [`HostSurface`](crate::host::HostSurface) before
/// invoking them.
///
/// # Example
///
/// ```ignore
/// use bridge_traits::credentials::{CredentialOption, CredentialRequest, CredentialStore};
///
/// async fn fetch_password(store: &dyn CredentialStore) -> Result<(), CredentialStoreError> {
///     let request = CredentialRequest::single(CredentialOption::Password);
///     let credential = store.get_credential(request).await?;
///     // dispatch on the credential variant...
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Show the system picker for the requested credential kinds and return
    /// the user's selection.
    ///
    /// Returns [`CredentialStoreError::Cancelled`] when the user dismisses
    /// the prompt and [`CredentialStoreError::NoCredential`] when nothing
    /// matches the request.
    async fn get_credential(
        &self,
        request: CredentialRequest,
    ) -> Result<Credential, CredentialStoreError>;

    /// Persist a password credential, prompting the user if the platform
    /// requires confirmation.
    async fn create_password_credential(
        &self,
        request: CreatePasswordRequest,
    ) -> Result<(), CredentialStoreError>;

    /// Clear stored credential session state (e.g. after sign-out, so the
    /// next picker does not silently reuse the previous account).
    async fn clear_credential_state(&self) -> Result<(), CredentialStoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_google_id_token_envelope() {
        let data = json!({
            "id_token": "header.payload.signature",
            "id": "user@example.com",
            "display_name": "User Example",
        });

        let credential = GoogleIdTokenCredential::from_envelope(&data).unwrap();
        assert_eq!(credential.id_token, "header.payload.signature");
        assert_eq!(credential.id.as_deref(), Some("user@example.com"));
        assert_eq!(credential.display_name.as_deref(), Some("User Example"));
        assert!(credential.profile_picture_uri.is_none());
    }

    #[test]
    fn rejects_envelope_without_id_token() {
        let data = json!({ "id": "user@example.com" });
        let err = GoogleIdTokenCredential::from_envelope(&data).unwrap_err();
        assert!(err.to_string().contains("id_token"));
    }

    #[test]
    fn rejects_empty_id_token() {
        let data = json!({ "id_token": "" });
        assert!(GoogleIdTokenCredential::from_envelope(&data).is_err());
    }

    #[test]
    fn rejects_non_object_envelope() {
        let data = json!("not an object");
        assert!(GoogleIdTokenCredential::from_envelope(&data).is_err());
    }

    #[test]
    fn recognizes_google_envelope_types() {
        let bottom_sheet = CustomCredential {
            credential_type: GOOGLE_ID_TOKEN_CREDENTIAL_TYPE.to_string(),
            data: json!({}),
        };
        let button = CustomCredential {
            credential_type: GOOGLE_ID_TOKEN_SIWG_CREDENTIAL_TYPE.to_string(),
            data: json!({}),
        };
        let foreign = CustomCredential {
            credential_type: "com.example.UNRELATED".to_string(),
            data: json!({}),
        };

        assert!(bottom_sheet.is_google_id_token());
        assert!(button.is_google_id_token());
        assert!(!foreign.is_google_id_token());
    }

    #[test]
    fn debug_redacts_password() {
        let credential = PasswordCredential {
            id: "user@example.com".to_string(),
            password: "hunter2".to_string(),
        };
        let debug = format!("{:?}", credential);
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn debug_redacts_id_token() {
        let credential = GoogleIdTokenCredential {
            id_token: "secret-token".to_string(),
            id: None,
            display_name: None,
            profile_picture_uri: None,
        };
        let debug = format!("{:?}", credential);
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("secret-token"));
    }

    #[test]
    fn credential_type_name() {
        let password = Credential::Password(PasswordCredential {
            id: "a@b.c".to_string(),
            password: "p".to_string(),
        });
        assert_eq!(password.type_name(), "PasswordCredential");

        let other = Credential::Other {
            credential_type: "androidx.credentials.TYPE_PUBLIC_KEY_CREDENTIAL".to_string(),
        };
        assert_eq!(
            other.type_name(),
            "androidx.credentials.TYPE_PUBLIC_KEY_CREDENTIAL"
        );
    }
}
