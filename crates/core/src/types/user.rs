//! Signed-in shopper record.

use serde::{Deserialize, Serialize};

use super::UserId;

/// The current shopper.
///
/// Persisted as `{"id", "email", "name"}`. The email is stored as given;
/// validating it is up to whoever issues the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    /// Display name; falls back to the text before the first `@`.
    pub name: String,
}

impl User {
    /// Build a user, deriving the name from the email when `name` is blank.
    #[must_use]
    pub fn new(id: UserId, email: impl Into<String>, name: Option<&str>) -> Self {
        let email = email.into();
        let name = match name.map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => default_name(&email).to_string(),
        };
        Self { id, email, name }
    }
}

/// Everything before the first `@`, or the whole string when there is none.
fn default_name(email: &str) -> &str {
    email.split_once('@').map_or(email, |(local, _)| local)
}
