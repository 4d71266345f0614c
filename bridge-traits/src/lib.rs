//! # Host Bridge Traits
//!
//! Platform abstraction traits that must be implemented by each host platform.
//!
//! ## Overview
//!
//! This crate defines the contract between the authentication core and the
//! two external collaborators it orchestrates, plus the host surface it runs
//! on. Each trait represents a capability the core requires but that must be
//! implemented differently per platform:
//!
//! - [`CredentialStore`](credentials::CredentialStore) - the platform-native
//!   credential manager that saves, retrieves and clears login credentials
//!   behind a system UI prompt (Credential Manager on Android, a stub on
//!   platforms without support).
//! - [`IdentityBackend`](identity::IdentityBackend) - the remote
//!   authentication service that verifies email/password pairs or Google ID
//!   tokens, tracks the ambient signed-in user, and mints identity tokens.
//! - [`HostSurface`](host::HostSurface) - reports whether the platform
//!   supports the credential store at all and whether a foreground
//!   interactive surface is currently available to show pickers on.
//!
//! ## Error Handling
//!
//! Each collaborator reports failures through its own closed error enum
//! ([`CredentialStoreError`], [`IdentityError`]). The core translates these
//! into its public taxonomy through a single mapping table per collaborator,
//! so classification logic never leaks into individual call sites.
//!
//! ## Thread Safety
//!
//! All bridge traits require `Send + Sync` bounds to support safe concurrent
//! usage across async tasks. Implementations must ensure thread safety.

pub mod credentials;
pub mod error;
pub mod host;
pub mod identity;

pub use error::{CredentialStoreError, GoogleIdTokenParseError, IdentityError};

// Re-export commonly used types
pub use credentials::{
    CreatePasswordRequest, Credential, CredentialOption, CredentialRequest, CredentialStore,
    CustomCredential, GoogleIdOption, GoogleIdTokenCredential, PasswordCredential,
    SignInWithGoogleOption,
};
pub use host::{HostSurface, StaticHostSurface};
pub use identity::{IdentityBackend, SignInOutcome, UserRecord};
