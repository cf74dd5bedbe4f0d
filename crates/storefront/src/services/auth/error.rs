//! Authentication error types.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] phantom_spares_core::EmailError),

    /// The verifier rejected the credentials.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The verifier could not be reached or failed internally.
    #[error("credential verifier unavailable: {0}")]
    VerifierUnavailable(String),

    /// Persisting the session failed; the previous user is still current.
    #[error("failed to persist user: {0}")]
    Storage(#[from] StorageError),
}
