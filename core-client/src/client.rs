//! # Authentication Client
//!
//! The thin wrapper in front of the orchestrator. It runs on the host side
//! of the layer boundary, so it validates and normalizes input on its own
//! even though the orchestrator re-checks everything: the two layers may
//! live in different processes and neither trusts the other's checks.
//!
//! On a platform without credential store support every operation except
//! [`is_available`](AuthClient::is_available) fails immediately with
//! [`AuthError::UnsupportedPlatform`], before any collaborator call.
//!
//! ## Usage
//!
//! ```ignore
//! use core_client::{AuthClient, AuthConfig, AuthDependencies, EmailPasswordInput};
//! use std::sync::Arc;
//!
//! let deps = AuthDependencies::new(credential_store, identity_backend, host_surface);
//! let config = AuthConfig::builder()
//!     .web_client_id("1234567890-abc.apps.googleusercontent.com")
//!     .build();
//! let client = AuthClient::new(deps, config);
//!
//! let result = client
//!     .sign_in_with_email_password(EmailPasswordInput::new("user@example.com", "secret"))
//!     .await?;
//! println!("signed in as {}", result.user.uid);
//! ```

use bridge_traits::credentials::CredentialStore;
use bridge_traits::host::HostSurface;
use bridge_traits::identity::IdentityBackend;
use core_auth::{
    AuthConfig, AuthError, AuthOrchestrator, AuthResult, CurrentSessionInput,
    DeleteCurrentUserInput, EmailPasswordInput, GoogleBottomSheetInput, GoogleButtonInput,
    IdTokenInput, IdTokenResult, Result, SavePasswordCredentialInput, SignOutInput,
};
use std::sync::Arc;
use tracing::debug;

/// Aggregated handle to the bridge dependencies the core requires.
pub struct AuthDependencies {
    pub credential_store: Arc<dyn CredentialStore>,
    pub identity: Arc<dyn IdentityBackend>,
    pub host: Arc<dyn HostSurface>,
}

impl AuthDependencies {
    /// Construct a dependency bundle from explicit bridge handles.
    pub fn new(
        credential_store: Arc<dyn CredentialStore>,
        identity: Arc<dyn IdentityBackend>,
        host: Arc<dyn HostSurface>,
    ) -> Self {
        Self {
            credential_store,
            identity,
            host,
        }
    }
}

/// Primary facade exposed to host applications.
pub struct AuthClient {
    host: Arc<dyn HostSurface>,
    orchestrator: AuthOrchestrator,
}

impl AuthClient {
    /// Create a new client from the provided dependencies and configuration.
    pub fn new(deps: AuthDependencies, config: AuthConfig) -> Self {
        let host = deps.host.clone();
        let orchestrator = AuthOrchestrator::new(
            deps.credential_store,
            deps.identity,
            deps.host,
            config,
        );
        Self { host, orchestrator }
    }

    /// True only when the platform supports the credential store and a
    /// foreground surface exists. Never fails; errors degrade to `false`.
    pub async fn is_available(&self) -> bool {
        if !self.host.credential_store_supported() {
            return false;
        }
        self.orchestrator.is_available().await
    }

    pub async fn current_session(
        &self,
        input: CurrentSessionInput,
    ) -> Result<Option<AuthResult>> {
        self.ensure_supported()?;
        self.orchestrator.current_session(input).await
    }

    pub async fn get_id_token(&self, input: IdTokenInput) -> Result<Option<IdTokenResult>> {
        self.ensure_supported()?;
        self.orchestrator.get_id_token(input).await
    }

    pub async fn sign_in_with_email_password(
        &self,
        input: EmailPasswordInput,
    ) -> Result<AuthResult> {
        self.ensure_supported()?;
        let input = Self::normalize_email_password(input)?;
        self.orchestrator.sign_in_with_email_password(input).await
    }

    pub async fn sign_up_with_email_password(
        &self,
        input: EmailPasswordInput,
    ) -> Result<AuthResult> {
        self.ensure_supported()?;
        let input = Self::normalize_email_password(input)?;
        self.orchestrator.sign_up_with_email_password(input).await
    }

    pub async fn save_password_credential(
        &self,
        input: SavePasswordCredentialInput,
    ) -> Result<()> {
        self.ensure_supported()?;
        assert_non_blank(&input.email, "email")?;
        assert_non_blank(&input.password, "password")?;
        let input = SavePasswordCredentialInput {
            email: input.email.trim().to_string(),
            password: input.password,
        };
        self.orchestrator.save_password_credential(input).await
    }

    pub async fn sign_in_with_google_button(
        &self,
        input: GoogleButtonInput,
    ) -> Result<AuthResult> {
        self.ensure_supported()?;
        let mut input = input;
        input.web_client_id = normalize_client_id(input.web_client_id.take());
        self.orchestrator.sign_in_with_google_button(input).await
    }

    pub async fn sign_in_with_google_bottom_sheet(
        &self,
        input: GoogleBottomSheetInput,
    ) -> Result<AuthResult> {
        self.ensure_supported()?;
        let mut input = input;
        input.web_client_id = normalize_client_id(input.web_client_id.take());
        self.orchestrator
            .sign_in_with_google_bottom_sheet(input)
            .await
    }

    pub async fn sign_out(&self, input: SignOutInput) -> Result<()> {
        self.ensure_supported()?;
        self.orchestrator.sign_out(input).await
    }

    pub async fn delete_current_user(&self, input: DeleteCurrentUserInput) -> Result<()> {
        self.ensure_supported()?;
        let mut input = input;
        input.web_client_id = normalize_client_id(input.web_client_id.take());
        self.orchestrator.delete_current_user(input).await
    }

    pub async fn clear_credential_state(&self) -> Result<()> {
        self.ensure_supported()?;
        self.orchestrator.clear_credential_state().await
    }

    fn ensure_supported(&self) -> Result<()> {
        if self.host.credential_store_supported() {
            Ok(())
        } else {
            debug!("credential store unsupported on this platform");
            Err(AuthError::UnsupportedPlatform)
        }
    }

    fn normalize_email_password(input: EmailPasswordInput) -> Result<EmailPasswordInput> {
        assert_non_blank(&input.email, "email")?;
        assert_non_blank(&input.password, "password")?;
        Ok(EmailPasswordInput {
            email: input.email.trim().to_string(),
            ..input
        })
    }
}

fn assert_non_blank(value: &str, field: &'static str) -> Result<()> {
    if value.trim().is_empty() {
        Err(AuthError::InvalidInput { field })
    } else {
        Ok(())
    }
}

fn normalize_client_id(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
