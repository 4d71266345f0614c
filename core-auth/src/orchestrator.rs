//! # Authentication Orchestrator
//!
//! Sequences the platform credential store and the identity backend into the
//! public sign-in operations.
//!
//! ## Overview
//!
//! Every operation is a single sequential async flow: validate input, check
//! the foreground precondition, call the collaborators, translate their
//! typed errors through one mapping table per collaborator, and normalize
//! the outcome into an [`AuthResult`] or a typed [`AuthError`]. The
//! orchestrator holds no mutable state; the only ambient state it reads is
//! the backend's current-user session, re-read on every call.
//!
//! ## Retry policy
//!
//! Nothing retries automatically except the documented cases: the
//! bottom-sheet picker and the Google reauthentication branch relax the
//! authorized-accounts filter once on "no credential", and deletion is
//! retried exactly once after a successful reauthentication.
//!
//! ## Error swallowing
//!
//! The single deliberately swallowed failure is the best-effort credential
//! save after a successful email/password authentication: a usable session
//! is never undone by a failed convenience save. The explicit
//! [`save_password_credential`](AuthOrchestrator::save_password_credential)
//! operation surfaces the same failures instead.

use crate::config::AuthConfig;
use crate::error::{AuthError, Result};
use crate::retry::get_with_relaxed_retry;
use crate::types::{
    AuthProvider, AuthResult, CurrentSessionInput, DeleteCurrentUserInput, EmailPasswordInput,
    GoogleBottomSheetInput, GoogleButtonInput, IdTokenInput, IdTokenResult,
    SavePasswordCredentialInput, SignOutInput,
};
use bridge_traits::credentials::{
    CreatePasswordRequest, Credential, CredentialOption, CredentialRequest, CredentialStore,
    CustomCredential, GoogleIdOption, GoogleIdTokenCredential, SignInWithGoogleOption,
};
use bridge_traits::error::{CredentialStoreError, IdentityError};
use bridge_traits::host::HostSurface;
use bridge_traits::identity::{
    IdentityBackend, SignInOutcome, UserRecord, EMAIL_PROVIDER_ID, GOOGLE_PROVIDER_ID,
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Coordinates the credential store, the identity backend and the host
/// surface behind the public operation set.
pub struct AuthOrchestrator {
    credential_store: Arc<dyn CredentialStore>,
    identity: Arc<dyn IdentityBackend>,
    host: Arc<dyn HostSurface>,
    config: AuthConfig,
}

impl AuthOrchestrator {
    pub fn new(
        credential_store: Arc<dyn CredentialStore>,
        identity: Arc<dyn IdentityBackend>,
        host: Arc<dyn HostSurface>,
        config: AuthConfig,
    ) -> Self {
        Self {
            credential_store,
            identity,
            host,
            config,
        }
    }

    /// Whether credential-based sign-in can work right now: the platform
    /// must support the credential store and a foreground surface must
    /// exist.
    pub async fn is_available(&self) -> bool {
        self.host.credential_store_supported() && self.host.has_foreground()
    }

    /// Build an [`AuthResult`] from the ambient signed-in user, without any
    /// sign-in round trip. Returns `Ok(None)` when nobody is signed in.
    #[instrument(skip(self, input))]
    pub async fn current_session(
        &self,
        input: CurrentSessionInput,
    ) -> Result<Option<AuthResult>> {
        let user = match self.identity.current_user().await {
            Some(user) => user,
            None => return Ok(None),
        };
        let provider = Self::detect_provider(&user);
        let result = self
            .build_auth_result(user, provider, None, input.force_refresh_id_token)
            .await?;
        Ok(Some(result))
    }

    /// Fetch a bare identity token for the ambient signed-in user. Returns
    /// `Ok(None)` when nobody is signed in.
    #[instrument(skip(self, input))]
    pub async fn get_id_token(&self, input: IdTokenInput) -> Result<Option<IdTokenResult>> {
        let user = match self.identity.current_user().await {
            Some(user) => user,
            None => return Ok(None),
        };
        let provider = Self::detect_provider(&user);
        let id_token = self.fetch_id_token(input.force_refresh_id_token).await?;
        Ok(Some(IdTokenResult { id_token, provider }))
    }

    /// Sign an existing user in with an email/password pair.
    #[instrument(skip(self, input))]
    pub async fn sign_in_with_email_password(
        &self,
        input: EmailPasswordInput,
    ) -> Result<AuthResult> {
        self.email_password_auth(&input, false).await
    }

    /// Create a new account from an email/password pair and sign it in.
    #[instrument(skip(self, input))]
    pub async fn sign_up_with_email_password(
        &self,
        input: EmailPasswordInput,
    ) -> Result<AuthResult> {
        self.email_password_auth(&input, true).await
    }

    /// Persist a password credential in the store. Unlike the implicit save
    /// during sign-in, failures here surface to the caller.
    #[instrument(skip(self, input))]
    pub async fn save_password_credential(
        &self,
        input: SavePasswordCredentialInput,
    ) -> Result<()> {
        let email = input.email.trim().to_string();
        Self::validate_email_password(&email, &input.password)?;
        self.require_foreground()?;

        self.credential_store
            .create_password_credential(CreatePasswordRequest {
                id: email,
                password: input.password,
            })
            .await
            .map_err(Self::map_store_error)?;
        info!("password credential saved");
        Ok(())
    }

    /// Sign in through the dedicated Sign in with Google button flow: one
    /// retrieval attempt, no retry.
    #[instrument(skip(self, input))]
    pub async fn sign_in_with_google_button(
        &self,
        input: GoogleButtonInput,
    ) -> Result<AuthResult> {
        self.require_foreground()?;

        let option = SignInWithGoogleOption {
            server_client_id: self
                .config
                .resolve_web_client_id(input.web_client_id.as_deref())?,
            nonce: non_blank(input.nonce.as_deref()),
            hosted_domain_filter: self.config.hosted_domain_filter().map(str::to_string),
        };
        let credential = self
            .credential_store
            .get_credential(CredentialRequest::single(
                CredentialOption::SignInWithGoogle(option),
            ))
            .await
            .map_err(Self::map_store_error)?;

        let custom = match credential {
            Credential::Custom(custom) => custom,
            other => {
                return Err(AuthError::UnexpectedCredentialType(format!(
                    "expected Google credential but received {}",
                    other.type_name()
                )))
            }
        };

        let outcome = self.exchange_google_credential(&custom).await?;
        info!("Google button sign-in completed");
        self.build_auth_result(
            outcome.user,
            AuthProvider::Google,
            outcome.is_new_user,
            input.force_refresh_id_token,
        )
        .await
    }

    /// Sign in through the combined bottom-sheet picker, which offers Google
    /// accounts and (optionally) stored passwords in one prompt.
    ///
    /// When the request is filtered to previously-authorized accounts and
    /// nothing matches, the request is rebuilt without the filter and
    /// retried exactly once (if enabled). This lets a user who declined
    /// "save account" the first time still sign in, at the cost of one extra
    /// round trip only on that path.
    #[instrument(skip(self, input))]
    pub async fn sign_in_with_google_bottom_sheet(
        &self,
        input: GoogleBottomSheetInput,
    ) -> Result<AuthResult> {
        self.require_foreground()?;

        let initial_filter = input.filter_by_authorized_accounts;
        let first = self.bottom_sheet_request(&input, initial_filter)?;
        let relaxed = self.bottom_sheet_request(&input, false)?;
        let retry = initial_filter && input.retry_with_all_google_accounts_on_no_credential;

        let credential = get_with_relaxed_retry(
            self.credential_store.as_ref(),
            first,
            relaxed,
            retry,
        )
        .await
        .map_err(Self::map_store_error)?;

        let (outcome, provider) = match credential {
            Credential::Password(credential) => {
                debug!("bottom sheet returned a password credential");
                let outcome = self
                    .identity
                    .sign_in_with_password(&credential.id, &credential.password)
                    .await
                    .map_err(Self::map_identity_error)?;
                (outcome, AuthProvider::Password)
            }
            Credential::Custom(custom) => {
                debug!("bottom sheet returned a Google credential");
                let outcome = self.exchange_google_credential(&custom).await?;
                (outcome, AuthProvider::Google)
            }
            Credential::Other { credential_type } => {
                return Err(AuthError::UnsupportedCredential(format!(
                    "unsupported credential type: {credential_type}"
                )))
            }
        };

        info!(provider = %provider, "bottom sheet sign-in completed");
        self.build_auth_result(
            outcome.user,
            provider,
            outcome.is_new_user,
            input.force_refresh_id_token,
        )
        .await
    }

    /// Sign out of the identity backend, optionally clearing credential
    /// store state afterwards. The clear is a hard error when it fails; the
    /// caller explicitly asked for it.
    #[instrument(skip(self, input))]
    pub async fn sign_out(&self, input: SignOutInput) -> Result<()> {
        self.identity.sign_out().await;
        info!("signed out");
        if input.clear_credential_state {
            self.clear_credential_state().await?;
        }
        Ok(())
    }

    /// Delete the current user, reauthenticating first when the backend
    /// demands a recent login.
    ///
    /// Deletion is attempted at most twice: once up front and once
    /// immediately after a successful reauthentication. Never looped.
    #[instrument(skip(self, input))]
    pub async fn delete_current_user(&self, input: DeleteCurrentUserInput) -> Result<()> {
        self.require_foreground()?;
        let user = self.identity.current_user().await.ok_or_else(|| {
            AuthError::AuthInvalidUser("no signed-in user to delete".to_string())
        })?;

        match self.identity.delete_current_user().await {
            Ok(()) => {}
            Err(IdentityError::RecentLoginRequired(_)) => {
                if !input.reauthenticate_if_required {
                    return Err(AuthError::AuthRequiresRecentLogin(
                        "recent login is required to delete the current user".to_string(),
                    ));
                }
                self.reauthenticate_current_user(&user, &input).await?;
                self.identity
                    .delete_current_user()
                    .await
                    .map_err(Self::map_delete_error)?;
            }
            Err(error) => return Err(Self::map_delete_error(error)),
        }

        info!("current user deleted");
        if input.clear_credential_state {
            self.clear_credential_state().await?;
        }
        Ok(())
    }

    /// Clear credential store session state.
    #[instrument(skip(self))]
    pub async fn clear_credential_state(&self) -> Result<()> {
        self.require_foreground()?;
        self.credential_store
            .clear_credential_state()
            .await
            .map_err(|error| AuthError::ClearCredentialStateFailed(error.to_string()))?;
        debug!("credential state cleared");
        Ok(())
    }

    // ---- shared flow pieces ----

    async fn email_password_auth(
        &self,
        input: &EmailPasswordInput,
        sign_up: bool,
    ) -> Result<AuthResult> {
        let email = input.email.trim().to_string();
        Self::validate_email_password(&email, &input.password)?;
        self.require_foreground()?;

        let outcome = if sign_up {
            self.identity
                .create_user_with_password(&email, &input.password)
                .await
        } else {
            self.identity
                .sign_in_with_password(&email, &input.password)
                .await
        }
        .map_err(Self::map_identity_error)?;

        self.maybe_save_password_credential(&email, &input.password, input.save_password_credential)
            .await;

        info!(sign_up, "email/password authentication completed");
        self.build_auth_result(
            outcome.user,
            AuthProvider::Password,
            outcome.is_new_user,
            input.force_refresh_id_token,
        )
        .await
    }

    /// Best-effort save after a successful authentication. Failures are
    /// logged and dropped so they can never undo the session.
    async fn maybe_save_password_credential(
        &self,
        email: &str,
        password: &str,
        should_save: bool,
    ) {
        if !should_save {
            return;
        }
        if let Err(error) = self
            .credential_store
            .create_password_credential(CreatePasswordRequest {
                id: email.to_string(),
                password: password.to_string(),
            })
            .await
        {
            debug!(error = %error, "best-effort credential save failed; continuing");
        }
    }

    async fn exchange_google_credential(
        &self,
        credential: &CustomCredential,
    ) -> Result<SignInOutcome> {
        if !credential.is_google_id_token() {
            return Err(AuthError::UnsupportedCredential(format!(
                "unsupported custom credential type: {}",
                credential.credential_type
            )));
        }
        let google = GoogleIdTokenCredential::from_envelope(&credential.data)
            .map_err(|error| AuthError::GoogleIdTokenParse(error.to_string()))?;
        self.identity
            .sign_in_with_google_id_token(&google.id_token)
            .await
            .map_err(Self::map_identity_error)
    }

    async fn reauthenticate_current_user(
        &self,
        user: &UserRecord,
        input: &DeleteCurrentUserInput,
    ) -> Result<()> {
        match Self::detect_reauth_provider(user) {
            Some(AuthProvider::Password) => self.reauthenticate_password_user(user).await,
            Some(AuthProvider::Google) => {
                self.reauthenticate_google_user(
                    input.web_client_id.as_deref(),
                    input.nonce.as_deref(),
                )
                .await
            }
            None => Err(Self::reauth_required(
                "unable to reauthenticate automatically for the current user provider",
            )),
        }
    }

    async fn reauthenticate_password_user(&self, user: &UserRecord) -> Result<()> {
        let credential = self
            .credential_store
            .get_credential(CredentialRequest::single(CredentialOption::Password))
            .await
            .map_err(|error| {
                Self::reauth_required(format!(
                    "failed to retrieve credentials for reauthentication: {error}"
                ))
            })?;

        let credential = match credential {
            Credential::Password(credential) => credential,
            other => {
                return Err(Self::reauth_required(format!(
                    "expected password credential for reauthentication but received {}",
                    other.type_name()
                )))
            }
        };

        let current_email = user
            .email
            .as_deref()
            .map(|email| email.trim().to_lowercase())
            .ok_or_else(|| {
                Self::reauth_required(
                    "current user does not have an email address required for password reauthentication",
                )
            })?;
        let credential_email = credential.id.trim().to_lowercase();
        if credential_email != current_email {
            warn!("stored credential account does not match the current user");
            return Err(Self::reauth_required(
                "credential account does not match the current user",
            ));
        }

        self.identity
            .reauthenticate_with_password(&credential.id, &credential.password)
            .await
            .map_err(|error| {
                Self::reauth_required(format!("failed to reauthenticate the current user: {error}"))
            })
    }

    async fn reauthenticate_google_user(
        &self,
        web_client_id: Option<&str>,
        nonce: Option<&str>,
    ) -> Result<()> {
        let first = CredentialRequest::single(CredentialOption::GoogleId(
            self.google_id_option(web_client_id, nonce, true, false)?,
        ));
        let relaxed = CredentialRequest::single(CredentialOption::GoogleId(
            self.google_id_option(web_client_id, nonce, false, false)?,
        ));

        let credential =
            get_with_relaxed_retry(self.credential_store.as_ref(), first, relaxed, true)
                .await
                .map_err(|error| {
                    Self::reauth_required(format!(
                        "failed to retrieve credentials for reauthentication: {error}"
                    ))
                })?;

        let custom = match credential {
            Credential::Custom(custom) => custom,
            other => {
                return Err(Self::reauth_required(format!(
                    "expected Google credential for reauthentication but received {}",
                    other.type_name()
                )))
            }
        };
        if !custom.is_google_id_token() {
            return Err(Self::reauth_required(format!(
                "unsupported custom credential type for reauthentication: {}",
                custom.credential_type
            )));
        }
        let google = GoogleIdTokenCredential::from_envelope(&custom.data)
            .map_err(|error| Self::reauth_required(error.to_string()))?;

        self.identity
            .reauthenticate_with_google_id_token(&google.id_token)
            .await
            .map_err(|error| {
                Self::reauth_required(format!("failed to reauthenticate the current user: {error}"))
            })
    }

    async fn build_auth_result(
        &self,
        user: UserRecord,
        provider: AuthProvider,
        is_new_user: Option<bool>,
        force_refresh: bool,
    ) -> Result<AuthResult> {
        let id_token = self.fetch_id_token(force_refresh).await?;
        Ok(AuthResult {
            id_token,
            provider,
            is_new_user,
            user: user.into(),
        })
    }

    async fn fetch_id_token(&self, force_refresh: bool) -> Result<String> {
        let token = self
            .identity
            .id_token(force_refresh)
            .await
            .map_err(|error| AuthError::IdTokenUnavailable(error.to_string()))?;
        match token {
            Some(token) if !token.is_empty() => Ok(token),
            _ => Err(AuthError::IdTokenUnavailable(
                "identity token is unavailable for the current user".to_string(),
            )),
        }
    }

    fn bottom_sheet_request(
        &self,
        input: &GoogleBottomSheetInput,
        filter_by_authorized_accounts: bool,
    ) -> Result<CredentialRequest> {
        let mut options = vec![CredentialOption::GoogleId(self.google_id_option(
            input.web_client_id.as_deref(),
            input.nonce.as_deref(),
            filter_by_authorized_accounts,
            input.auto_select_enabled,
        )?)];
        if input.include_password_option {
            options.push(CredentialOption::Password);
        }
        Ok(CredentialRequest::new(options))
    }

    fn google_id_option(
        &self,
        web_client_id: Option<&str>,
        nonce: Option<&str>,
        filter_by_authorized_accounts: bool,
        auto_select_enabled: bool,
    ) -> Result<GoogleIdOption> {
        Ok(GoogleIdOption {
            server_client_id: self.config.resolve_web_client_id(web_client_id)?,
            nonce: non_blank(nonce),
            filter_by_authorized_accounts,
            auto_select_enabled,
        })
    }

    fn validate_email_password(email: &str, password: &str) -> Result<()> {
        if email.trim().is_empty() {
            return Err(AuthError::InvalidInput { field: "email" });
        }
        if password.trim().is_empty() {
            return Err(AuthError::InvalidInput { field: "password" });
        }
        Ok(())
    }

    fn require_foreground(&self) -> Result<()> {
        if self.host.has_foreground() {
            Ok(())
        } else {
            Err(AuthError::NoForegroundContext)
        }
    }

    /// Provider used for session results; unrecognized sets fall back to
    /// password.
    fn detect_provider(user: &UserRecord) -> AuthProvider {
        Self::detect_reauth_provider(user).unwrap_or(AuthProvider::Password)
    }

    /// Provider used for automatic reauthentication; unrecognized sets mean
    /// no automatic recovery is possible.
    fn detect_reauth_provider(user: &UserRecord) -> Option<AuthProvider> {
        let has = |provider_id: &str| {
            user.provider_ids
                .iter()
                .map(|id| id.trim())
                .filter(|id| !id.is_empty())
                .any(|id| id == provider_id)
        };
        if has(GOOGLE_PROVIDER_ID) {
            Some(AuthProvider::Google)
        } else if has(EMAIL_PROVIDER_ID) {
            Some(AuthProvider::Password)
        } else {
            None
        }
    }

    // ---- mapping tables, one per collaborator ----

    fn map_store_error(error: CredentialStoreError) -> AuthError {
        match error {
            CredentialStoreError::Cancelled(detail) => AuthError::Cancelled(detail),
            CredentialStoreError::Interrupted(detail) => AuthError::Interrupted(detail),
            CredentialStoreError::NoCredential(detail) => AuthError::NoCredentialAvailable(detail),
            CredentialStoreError::ProviderConfiguration(detail) => {
                AuthError::ProviderMisconfigured(detail)
            }
            CredentialStoreError::NoCreateOption(detail) => AuthError::NoCreateOption(detail),
            CredentialStoreError::Custom(detail) => AuthError::CredentialStoreCustom(detail),
            CredentialStoreError::Unknown(detail) => AuthError::CredentialStoreUnknown(detail),
        }
    }

    fn map_identity_error(error: IdentityError) -> AuthError {
        match error {
            IdentityError::InvalidCredentials(detail) => AuthError::AuthInvalidCredentials(detail),
            IdentityError::InvalidUser(detail) => AuthError::AuthInvalidUser(detail),
            IdentityError::RecentLoginRequired(detail) => {
                AuthError::AuthRequiresRecentLogin(detail)
            }
            IdentityError::EmailAlreadyInUse(detail) => AuthError::AuthEmailAlreadyInUse(detail),
            IdentityError::WeakPassword(detail) => AuthError::AuthWeakPassword(detail),
            IdentityError::Other(detail) => AuthError::GenericAuthFailure(detail),
        }
    }

    fn map_delete_error(error: IdentityError) -> AuthError {
        match error {
            IdentityError::RecentLoginRequired(detail) => {
                AuthError::AuthRequiresRecentLogin(detail)
            }
            other => Self::map_identity_error(other),
        }
    }

    fn reauth_required(detail: impl Into<String>) -> AuthError {
        AuthError::AuthReauthRequired(detail.into())
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
