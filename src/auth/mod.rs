//! Session-cookie authentication.
//!
//! `require_session` gates protected routes: it resolves the session cookie
//! through the configured [`SessionStore`] and attaches an [`AuthContext`] to
//! the request. Handlers take `AuthContext` as an extractor.

pub mod password;
pub mod session;

use crate::error::AppError;
use crate::AppState;
use axum::{
    async_trait,
    body::Body,
    extract::{FromRequestParts, State},
    http::{header, request::Parts, HeaderMap, Request},
    middleware::Next,
    response::Response,
};

pub use session::{InMemorySessionStore, PgSessionStore, SessionStore, UserIdentity};

pub const SESSION_COOKIE: &str = "washbay_session";

/// Cookie attributes for issued sessions.
#[derive(Debug, Clone, Copy)]
pub struct SessionSettings {
    pub ttl_secs: u64,
    pub secure: bool,
}

impl SessionSettings {
    pub fn cookie(&self, token: &str) -> String {
        let mut cookie = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            SESSION_COOKIE, token, self.ttl_secs
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie
    }

    pub fn expired_cookie(&self) -> String {
        let mut cookie = format!(
            "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
            SESSION_COOKIE
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie
    }
}

/// The authenticated user for the current request.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub identity: UserIdentity,
    pub token: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// Extracts the session token from the `Cookie` header.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

pub async fn require_session(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next<Body>,
) -> Result<Response, AppError> {
    let token = session_token(req.headers()).ok_or(AppError::Unauthorized)?;

    let identity = state
        .sessions
        .lookup(&token)
        .await?
        .ok_or(AppError::Unauthorized)?;

    tracing::debug!(user_id = identity.user_id, "Session resolved");

    req.extensions_mut().insert(AuthContext { identity, token });
    Ok(next.run(req).await)
}
