use thiserror::Error;

/// The public failure taxonomy.
///
/// Every external failure is translated into exactly one of these variants
/// by the orchestrator's per-collaborator mapping tables. Each variant has a
/// stable machine-readable [`code`](AuthError::code) that callers can switch
/// on; the display message carries the human-readable detail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("the credential manager is not available on this platform")]
    UnsupportedPlatform,

    #[error("{field} cannot be blank")]
    InvalidInput { field: &'static str },

    #[error("no foreground surface available; ensure the app is in the foreground")]
    NoForegroundContext,

    #[error("webClientId is required; pass it per call or configure a default")]
    GoogleClientIdRequired,

    #[error("failed to parse Google ID token credential: {0}")]
    GoogleIdTokenParse(String),

    #[error("unsupported credential: {0}")]
    UnsupportedCredential(String),

    #[error("unexpected credential type: {0}")]
    UnexpectedCredentialType(String),

    #[error("credential prompt was cancelled: {0}")]
    Cancelled(String),

    #[error("credential operation was interrupted: {0}")]
    Interrupted(String),

    #[error("no credential available: {0}")]
    NoCredentialAvailable(String),

    #[error("credential provider is misconfigured: {0}")]
    ProviderMisconfigured(String),

    #[error("no option to create the credential: {0}")]
    NoCreateOption(String),

    #[error("credential provider error: {0}")]
    CredentialStoreCustom(String),

    #[error("unknown credential store error: {0}")]
    CredentialStoreUnknown(String),

    #[error("failed to clear credential state: {0}")]
    ClearCredentialStateFailed(String),

    #[error("invalid credentials: {0}")]
    AuthInvalidCredentials(String),

    #[error("invalid user: {0}")]
    AuthInvalidUser(String),

    #[error("recent login required: {0}")]
    AuthRequiresRecentLogin(String),

    #[error("reauthentication required: {0}")]
    AuthReauthRequired(String),

    #[error("email already in use: {0}")]
    AuthEmailAlreadyInUse(String),

    #[error("weak password: {0}")]
    AuthWeakPassword(String),

    #[error("authentication failed: {0}")]
    GenericAuthFailure(String),

    #[error("identity token unavailable: {0}")]
    IdTokenUnavailable(String),
}

impl AuthError {
    /// Stable machine-readable code for this failure kind.
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::UnsupportedPlatform => "E_UNSUPPORTED_PLATFORM",
            AuthError::InvalidInput { .. } => "E_INVALID_INPUT",
            AuthError::NoForegroundContext => "E_NO_FOREGROUND",
            AuthError::GoogleClientIdRequired => "E_GOOGLE_WEB_CLIENT_ID_REQUIRED",
            AuthError::GoogleIdTokenParse(_) => "E_GOOGLE_ID_TOKEN_PARSE",
            AuthError::UnsupportedCredential(_) => "E_UNSUPPORTED_CREDENTIAL",
            AuthError::UnexpectedCredentialType(_) => "E_UNEXPECTED_CREDENTIAL_TYPE",
            AuthError::Cancelled(_) => "E_CANCELLED",
            AuthError::Interrupted(_) => "E_INTERRUPTED",
            AuthError::NoCredentialAvailable(_) => "E_NO_CREDENTIAL",
            AuthError::ProviderMisconfigured(_) => "E_PROVIDER_CONFIGURATION",
            AuthError::NoCreateOption(_) => "E_NO_CREATE_OPTION",
            AuthError::CredentialStoreCustom(_) => "E_CUSTOM",
            AuthError::CredentialStoreUnknown(_) => "E_UNKNOWN",
            AuthError::ClearCredentialStateFailed(_) => "E_CLEAR_CREDENTIAL_STATE",
            AuthError::AuthInvalidCredentials(_) => "E_AUTH_INVALID_CREDENTIALS",
            AuthError::AuthInvalidUser(_) => "E_AUTH_INVALID_USER",
            AuthError::AuthRequiresRecentLogin(_) => "E_AUTH_REQUIRES_RECENT_LOGIN",
            AuthError::AuthReauthRequired(_) => "E_AUTH_REAUTH_REQUIRED",
            AuthError::AuthEmailAlreadyInUse(_) => "E_AUTH_EMAIL_ALREADY_IN_USE",
            AuthError::AuthWeakPassword(_) => "E_AUTH_WEAK_PASSWORD",
            AuthError::GenericAuthFailure(_) => "E_AUTH",
            AuthError::IdTokenUnavailable(_) => "E_ID_TOKEN_UNAVAILABLE",
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(
            AuthError::UnsupportedPlatform.code(),
            "E_UNSUPPORTED_PLATFORM"
        );
        assert_eq!(
            AuthError::InvalidInput { field: "email" }.code(),
            "E_INVALID_INPUT"
        );
        assert_eq!(
            AuthError::AuthReauthRequired("detail".into()).code(),
            "E_AUTH_REAUTH_REQUIRED"
        );
        assert_eq!(AuthError::GenericAuthFailure("x".into()).code(), "E_AUTH");
    }

    #[test]
    fn display_names_the_blank_field() {
        let err = AuthError::InvalidInput { field: "password" };
        assert_eq!(err.to_string(), "password cannot be blank");
    }
}
