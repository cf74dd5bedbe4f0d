//! Authentication route handlers.
//!
//! Sign-in and registration accept an optional `?redirect=` target (for
//! example `/cart` after a refused checkout) and echo it back so the client
//! knows where to go next. Only same-site paths are honored.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use phantom_spares_core::User;

use crate::error::{Result, clear_sentry_user, set_sentry_user};
use crate::state::AppState;

/// Where shoppers land after signing in without a redirect.
pub const DEFAULT_REDIRECT: &str = "/";

// =============================================================================
// Request Types
// =============================================================================

/// Login request body.
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Registration request body.
#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
}

// Passwords stay out of logs and spans.
impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("email", &self.email)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Query parameters carrying the post-login destination.
#[derive(Debug, Default, Deserialize)]
pub struct RedirectQuery {
    pub redirect: Option<String>,
}

impl RedirectQuery {
    /// The requested destination if it is a same-site path.
    #[must_use]
    pub fn target(&self) -> String {
        self.redirect
            .as_deref()
            .filter(|path| is_local_path(path))
            .unwrap_or(DEFAULT_REDIRECT)
            .to_string()
    }
}

/// Accept `/cart` style paths; reject absolute and protocol-relative URLs.
fn is_local_path(path: &str) -> bool {
    path.starts_with('/') && !path.starts_with("//") && !path.contains('\\')
}

// =============================================================================
// Response Types
// =============================================================================

/// Result of a successful sign-in.
#[derive(Debug, Serialize)]
pub struct SignedIn {
    pub user: User,
    pub redirect: String,
}

/// The current session.
#[derive(Debug, Serialize)]
pub struct Session {
    pub authenticated: bool,
    pub user: Option<User>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Sign in.
#[instrument(skip(state))]
pub async fn login(
    State(state): State<AppState>,
    Query(query): Query<RedirectQuery>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<SignedIn>> {
    let mut auth = state.auth().lock().await;
    let user = auth.login(&body.email, &body.password).await?.clone();
    set_sentry_user(&user.id, Some(user.email.as_str()));

    Ok(Json(SignedIn {
        user,
        redirect: query.target(),
    }))
}

/// Create an account and sign in.
#[instrument(skip(state))]
pub async fn register(
    State(state): State<AppState>,
    Query(query): Query<RedirectQuery>,
    Json(body): Json<RegisterRequest>,
) -> Result<Json<SignedIn>> {
    let mut auth = state.auth().lock().await;
    let user = auth
        .register(&body.email, &body.password, body.name.as_deref())
        .await?
        .clone();
    set_sentry_user(&user.id, Some(user.email.as_str()));

    Ok(Json(SignedIn {
        user,
        redirect: query.target(),
    }))
}

/// Sign out.
#[instrument(skip(state))]
pub async fn logout(State(state): State<AppState>) -> Result<Json<Session>> {
    state.auth().lock().await.logout()?;
    clear_sentry_user();
    Ok(Json(Session {
        authenticated: false,
        user: None,
    }))
}

/// The signed-in shopper, if any.
pub async fn me(State(state): State<AppState>) -> Json<Session> {
    let auth = state.auth().lock().await;
    Json(Session {
        authenticated: auth.is_authenticated(),
        user: auth.current_user().cloned(),
    })
}
