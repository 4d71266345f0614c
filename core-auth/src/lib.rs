//! # Authentication Core
//!
//! Orchestrates sign-in flows over the platform credential store and the
//! remote identity backend.
//!
//! ## Overview
//!
//! This crate sequences and error-maps calls to the two injected
//! collaborators defined in `bridge-traits`. It owns no network code and no
//! storage: it validates input, applies the documented retry/fallback
//! policies, and normalizes every outcome into either an [`AuthResult`] or a
//! typed [`AuthError`].
//!
//! ## Features
//!
//! - Email/password sign-in and sign-up with best-effort credential saving
//! - Google sign-in via the dedicated button flow or the combined
//!   bottom-sheet picker, with a single authorized-accounts filter
//!   relaxation retry
//! - Reauthentication-before-delete with provider-specific recovery
//! - Session and identity-token fetch from the ambient signed-in user
//! - A stable machine-readable error code per failure kind

pub mod config;
pub mod error;
pub mod orchestrator;
pub mod types;

mod retry;

pub use config::{AuthConfig, AuthConfigBuilder};
pub use error::{AuthError, Result};
pub use orchestrator::AuthOrchestrator;
pub use types::{
    AuthProvider, AuthResult, CurrentSessionInput, DeleteCurrentUserInput, EmailPasswordInput,
    GoogleBottomSheetInput, GoogleButtonInput, IdTokenInput, IdTokenResult,
    SavePasswordCredentialInput, SignOutInput, UserProfile,
};
