//! End-to-end flows through the client facade, backed by stateful in-memory
//! fakes for both collaborators.

use async_trait::async_trait;
use bridge_traits::credentials::{
    CreatePasswordRequest, Credential, CredentialOption, CredentialRequest, CredentialStore,
    PasswordCredential,
};
use bridge_traits::error::{CredentialStoreError, IdentityError};
use bridge_traits::host::StaticHostSurface;
use bridge_traits::identity::{IdentityBackend, SignInOutcome, UserRecord, EMAIL_PROVIDER_ID};
use core_client::{
    AuthClient, AuthConfig, AuthDependencies, AuthProvider, CurrentSessionInput,
    DeleteCurrentUserInput, EmailPasswordInput, IdTokenInput, SignOutInput,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Credential store that actually remembers saved password credentials.
#[derive(Default)]
struct InMemoryStore {
    saved: Mutex<Vec<PasswordCredential>>,
    clear_calls: AtomicUsize,
}

#[async_trait]
impl CredentialStore for InMemoryStore {
    async fn get_credential(
        &self,
        request: CredentialRequest,
    ) -> Result<Credential, CredentialStoreError> {
        let offers_password = request
            .options
            .iter()
            .any(|option| matches!(option, CredentialOption::Password));
        if !offers_password {
            return Err(CredentialStoreError::NoCredential(
                "only password credentials are stored in this fake".to_string(),
            ));
        }
        match self.saved.lock().unwrap().last().cloned() {
            Some(credential) => Ok(Credential::Password(credential)),
            None => Err(CredentialStoreError::NoCredential(
                "nothing saved".to_string(),
            )),
        }
    }

    async fn create_password_credential(
        &self,
        request: CreatePasswordRequest,
    ) -> Result<(), CredentialStoreError> {
        self.saved.lock().unwrap().push(PasswordCredential {
            id: request.id,
            password: request.password,
        });
        Ok(())
    }

    async fn clear_credential_state(&self) -> Result<(), CredentialStoreError> {
        self.clear_calls.fetch_add(1, Ordering::SeqCst);
        self.saved.lock().unwrap().clear();
        Ok(())
    }
}

/// Identity backend with real account state and an ambient current user.
#[derive(Default)]
struct InMemoryIdentity {
    accounts: Mutex<HashMap<String, (String, UserRecord)>>,
    current: Mutex<Option<UserRecord>>,
    require_recent_login: Mutex<bool>,
}

impl InMemoryIdentity {
    fn require_recent_login(&self) {
        *self.require_recent_login.lock().unwrap() = true;
    }

    fn record_for(email: &str) -> UserRecord {
        UserRecord {
            uid: format!("uid-{}", email.to_lowercase()),
            email: Some(email.to_string()),
            display_name: None,
            photo_url: None,
            email_verified: false,
            is_anonymous: false,
            created_at: None,
            last_sign_in_at: None,
            provider_ids: vec![EMAIL_PROVIDER_ID.to_string()],
        }
    }
}

#[async_trait]
impl IdentityBackend for InMemoryIdentity {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<SignInOutcome, IdentityError> {
        let accounts = self.accounts.lock().unwrap();
        let (stored_password, user) = accounts
            .get(&email.to_lowercase())
            .ok_or_else(|| IdentityError::InvalidUser("no such account".to_string()))?;
        if stored_password != password {
            return Err(IdentityError::InvalidCredentials(
                "wrong password".to_string(),
            ));
        }
        let user = user.clone();
        drop(accounts);
        *self.current.lock().unwrap() = Some(user.clone());
        Ok(SignInOutcome {
            user,
            is_new_user: Some(false),
        })
    }

    async fn create_user_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<SignInOutcome, IdentityError> {
        let mut accounts = self.accounts.lock().unwrap();
        let key = email.to_lowercase();
        if accounts.contains_key(&key) {
            return Err(IdentityError::EmailAlreadyInUse(email.to_string()));
        }
        let user = Self::record_for(email);
        accounts.insert(key, (password.to_string(), user.clone()));
        drop(accounts);
        *self.current.lock().unwrap() = Some(user.clone());
        Ok(SignInOutcome {
            user,
            is_new_user: Some(true),
        })
    }

    async fn sign_in_with_google_id_token(
        &self,
        _id_token: &str,
    ) -> Result<SignInOutcome, IdentityError> {
        Err(IdentityError::Other(
            "google sign-in is not wired in this fake".to_string(),
        ))
    }

    async fn current_user(&self) -> Option<UserRecord> {
        self.current.lock().unwrap().clone()
    }

    async fn id_token(&self, _force_refresh: bool) -> Result<Option<String>, IdentityError> {
        match self.current.lock().unwrap().as_ref() {
            Some(user) => Ok(Some(format!("token-for-{}", user.uid))),
            None => Err(IdentityError::Other("no current user".to_string())),
        }
    }

    async fn reauthenticate_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(), IdentityError> {
        let accounts = self.accounts.lock().unwrap();
        let key = email.trim().to_lowercase();
        match accounts.get(&key) {
            Some((stored_password, _)) if stored_password == password => {
                *self.require_recent_login.lock().unwrap() = false;
                Ok(())
            }
            _ => Err(IdentityError::InvalidCredentials(
                "reauthentication failed".to_string(),
            )),
        }
    }

    async fn reauthenticate_with_google_id_token(
        &self,
        _id_token: &str,
    ) -> Result<(), IdentityError> {
        Err(IdentityError::Other(
            "google reauthentication is not wired in this fake".to_string(),
        ))
    }

    async fn delete_current_user(&self) -> Result<(), IdentityError> {
        if *self.require_recent_login.lock().unwrap() {
            return Err(IdentityError::RecentLoginRequired(
                "session too old".to_string(),
            ));
        }
        let user = self
            .current
            .lock()
            .unwrap()
            .take()
            .ok_or_else(|| IdentityError::InvalidUser("no current user".to_string()))?;
        if let Some(email) = user.email {
            self.accounts.lock().unwrap().remove(&email.to_lowercase());
        }
        Ok(())
    }

    async fn sign_out(&self) {
        *self.current.lock().unwrap() = None;
    }
}

struct World {
    store: Arc<InMemoryStore>,
    identity: Arc<InMemoryIdentity>,
    client: AuthClient,
}

fn world() -> World {
    let store = Arc::new(InMemoryStore::default());
    let identity = Arc::new(InMemoryIdentity::default());
    let client = AuthClient::new(
        AuthDependencies::new(
            store.clone(),
            identity.clone(),
            Arc::new(StaticHostSurface::available()),
        ),
        AuthConfig::default(),
    );
    World {
        store,
        identity,
        client,
    }
}

#[tokio::test]
async fn sign_up_session_sign_out_round_trip() {
    let w = world();
    assert!(w.client.is_available().await);

    let result = w
        .client
        .sign_up_with_email_password(EmailPasswordInput::new("User@Example.com", "secret"))
        .await
        .unwrap();
    assert_eq!(result.provider, AuthProvider::Password);
    assert_eq!(result.is_new_user, Some(true));
    assert!(!result.id_token.is_empty());

    // The implicit best-effort save stored the credential.
    assert_eq!(w.store.saved.lock().unwrap().len(), 1);

    let session = w
        .client
        .current_session(CurrentSessionInput::default())
        .await
        .unwrap()
        .expect("session after sign-up");
    assert_eq!(session.provider, AuthProvider::Password);
    assert_eq!(session.user.email.as_deref(), Some("User@Example.com"));
    assert_eq!(session.is_new_user, None);

    let token = w
        .client
        .get_id_token(IdTokenInput::default())
        .await
        .unwrap()
        .expect("token while signed in");
    assert!(token.id_token.starts_with("token-for-"));

    w.client.sign_out(SignOutInput::default()).await.unwrap();
    assert_eq!(w.store.clear_calls.load(Ordering::SeqCst), 0);
    assert!(w
        .client
        .current_session(CurrentSessionInput::default())
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn stale_session_delete_recovers_through_stored_credential() {
    let w = world();
    w.client
        .sign_up_with_email_password(EmailPasswordInput::new("user@example.com", "secret"))
        .await
        .unwrap();

    // Simulate an aged session: the first delete attempt is rejected.
    w.identity.require_recent_login();

    w.client
        .delete_current_user(DeleteCurrentUserInput::default())
        .await
        .unwrap();

    // Account gone, session gone, credential state cleared on request.
    assert!(w.identity.accounts.lock().unwrap().is_empty());
    assert!(w
        .client
        .current_session(CurrentSessionInput::default())
        .await
        .unwrap()
        .is_none());
    assert_eq!(w.store.clear_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn wrong_password_surfaces_typed_error() {
    let w = world();
    w.client
        .sign_up_with_email_password(EmailPasswordInput::new("user@example.com", "secret"))
        .await
        .unwrap();
    w.client.sign_out(SignOutInput::default()).await.unwrap();

    let err = w
        .client
        .sign_in_with_email_password(EmailPasswordInput::new("user@example.com", "wrong"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "E_AUTH_INVALID_CREDENTIALS");
}
