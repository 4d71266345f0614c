use thiserror::Error;

/// Failures reported by the platform credential store.
///
/// This is a closed set: every native failure an implementation can observe
/// must be classified into one of these variants before it crosses the
/// bridge. `ProviderConfiguration` only occurs on retrieval;
/// `NoCreateOption` only on saves.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CredentialStoreError {
    #[error("credential prompt was cancelled: {0}")]
    Cancelled(String),

    #[error("credential operation was interrupted: {0}")]
    Interrupted(String),

    #[error("no credential available: {0}")]
    NoCredential(String),

    #[error("credential provider is misconfigured: {0}")]
    ProviderConfiguration(String),

    #[error("no option to create the credential: {0}")]
    NoCreateOption(String),

    #[error("credential provider error: {0}")]
    Custom(String),

    #[error("unknown credential store error: {0}")]
    Unknown(String),
}

/// Failures reported by the identity backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("invalid or disabled user: {0}")]
    InvalidUser(String),

    #[error("recent login required: {0}")]
    RecentLoginRequired(String),

    #[error("email already in use: {0}")]
    EmailAlreadyInUse(String),

    #[error("weak password: {0}")]
    WeakPassword(String),

    #[error("authentication failed: {0}")]
    Other(String),
}

/// A custom credential carried a Google ID token envelope that could not be
/// decoded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("failed to parse Google ID token credential: {0}")]
pub struct GoogleIdTokenParseError(pub String);
