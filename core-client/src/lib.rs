//! Host-facing authentication facade and bootstrap helpers.
//!
//! This crate wires host-provided bridge implementations (credential store,
//! identity backend, host surface) into the authentication core and exposes
//! the public operation set through [`AuthClient`]. The client is the thin
//! wrapper layer: it normalizes and validates input before the orchestrator
//! re-checks it, and it gates every operation on platform support so an
//! unsupported host degrades gracefully without any collaborator being
//! touched.

pub mod client;
pub mod logging;

pub use client::{AuthClient, AuthDependencies};
pub use logging::{init_logging, InitLoggingError, LogFormat, LoggingConfig};

// The full public surface of the core, so hosts depend on one crate.
pub use core_auth::{
    AuthConfig, AuthError, AuthProvider, AuthResult, CurrentSessionInput, DeleteCurrentUserInput,
    EmailPasswordInput, GoogleBottomSheetInput, GoogleButtonInput, IdTokenInput, IdTokenResult,
    Result, SavePasswordCredentialInput, SignOutInput, UserProfile,
};
