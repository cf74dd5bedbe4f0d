//! Authentication service.
//!
//! [`AuthStore`] owns the current shopper and persists it under
//! [`keys::USER`]. Whether an email/password pair is acceptable is decided by
//! a [`CredentialVerifier`]; the storefront ships with
//! [`AcceptAnyCredentials`], which signs anyone in with whatever email text it
//! is given. Wrap a verifier in [`RequireValidEmail`] to reject malformed
//! addresses before they reach it.

mod error;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use phantom_spares_core::{Email, User, UserId};

pub use error::AuthError;

use crate::storage::{SharedStorage, StorageError, keys, load_json, save_json};

/// Decides who a set of credentials belongs to.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// Check an existing account's credentials.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` when the pair is rejected.
    async fn verify_login(&self, email: &str, password: &str) -> Result<User, AuthError>;

    /// Create an account.
    ///
    /// # Errors
    ///
    /// Returns an `AuthError` when the account cannot be created.
    async fn register(
        &self,
        email: &str,
        password: &str,
        name: Option<&str>,
    ) -> Result<User, AuthError>;
}

/// Verifier that accepts every email/password pair.
///
/// Every shopper gets user id 1; the display name is the one given at
/// registration or the text before the first `@`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAnyCredentials;

impl AcceptAnyCredentials {
    const USER_ID: UserId = UserId::new(1);
}

#[async_trait]
impl CredentialVerifier for AcceptAnyCredentials {
    async fn verify_login(&self, email: &str, _password: &str) -> Result<User, AuthError> {
        Ok(User::new(Self::USER_ID, email, None))
    }

    async fn register(
        &self,
        email: &str,
        _password: &str,
        name: Option<&str>,
    ) -> Result<User, AuthError> {
        Ok(User::new(Self::USER_ID, email, name))
    }
}

/// Rejects malformed emails, then hands the trimmed address to `V`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequireValidEmail<V>(pub V);

#[async_trait]
impl<V: CredentialVerifier> CredentialVerifier for RequireValidEmail<V> {
    async fn verify_login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = Email::parse(email)?;
        self.0.verify_login(email.as_str(), password).await
    }

    async fn register(
        &self,
        email: &str,
        password: &str,
        name: Option<&str>,
    ) -> Result<User, AuthError> {
        let email = Email::parse(email)?;
        self.0.register(email.as_str(), password, name).await
    }
}

/// The current shopper, if any.
pub struct AuthStore {
    storage: SharedStorage,
    verifier: Arc<dyn CredentialVerifier>,
    current: Option<User>,
}

impl std::fmt::Debug for AuthStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthStore")
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

impl AuthStore {
    /// Open the session persisted in `storage`.
    ///
    /// A persisted user that fails to decode is logged and treated as
    /// signed out.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the backend cannot be read.
    pub fn open(
        storage: SharedStorage,
        verifier: Arc<dyn CredentialVerifier>,
    ) -> Result<Self, AuthError> {
        let current = match load_json::<User>(storage.as_ref(), keys::USER) {
            Ok(user) => user,
            Err(err @ StorageError::Corrupt { .. }) => {
                tracing::warn!(error = %err, "Ignoring unreadable persisted user");
                None
            }
            Err(err) => return Err(err.into()),
        };
        tracing::debug!(authenticated = current.is_some(), "Opened auth store");
        Ok(Self {
            storage,
            verifier,
            current,
        })
    }

    /// The signed-in shopper.
    #[must_use]
    pub const fn current_user(&self) -> Option<&User> {
        self.current.as_ref()
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns any error from the verifier, or `AuthError::Storage` if the
    /// session cannot be persisted.
    #[instrument(skip(self, password))]
    pub async fn login(&mut self, email: &str, password: &str) -> Result<&User, AuthError> {
        let user = self.verifier.verify_login(email, password).await?;
        self.set_current(user)
    }

    /// Create an account and sign in.
    ///
    /// # Errors
    ///
    /// Same as [`Self::login`].
    #[instrument(skip(self, password))]
    pub async fn register(
        &mut self,
        email: &str,
        password: &str,
        name: Option<&str>,
    ) -> Result<&User, AuthError> {
        let user = self.verifier.register(email, password, name).await?;
        self.set_current(user)
    }

    /// Sign out and forget the persisted user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the persisted user cannot be removed;
    /// the shopper stays signed in.
    #[instrument(skip(self))]
    pub fn logout(&mut self) -> Result<(), AuthError> {
        self.storage.remove(keys::USER)?;
        if let Some(user) = self.current.take() {
            tracing::info!(user_id = %user.id, "Signed out");
        }
        Ok(())
    }

    fn set_current(&mut self, user: User) -> Result<&User, AuthError> {
        save_json(self.storage.as_ref(), keys::USER, &user)?;
        tracing::info!(user_id = %user.id, "Signed in");
        Ok(self.current.insert(user))
    }
}
