use crate::auth::{password, session_token, AuthContext, UserIdentity};
use crate::error::AppError;
use crate::extract::ApiJson;
use crate::schemas::{
    AuthResponse, LoginRequest, MessageResponse, RegisterRequest, SessionStatusResponse,
};
use crate::AppState;
use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

const MIN_PASSWORD_LEN: usize = 6;

/// Runs password hashing off the async workers.
async fn blocking<T, F>(work: F) -> Result<T, AppError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| AppError::InternalError(format!("Password task failed: {}", e)))
}

pub async fn register(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let username = payload.username.trim();
    if username.is_empty() || payload.password.is_empty() || payload.confirm_password.is_empty() {
        return Err(AppError::ValidationError("All fields are required".to_string()));
    }
    if payload.password != payload.confirm_password {
        return Err(AppError::ValidationError("Passwords do not match".to_string()));
    }
    if payload.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::ValidationError(format!(
            "Password must be at least {} characters long",
            MIN_PASSWORD_LEN
        )));
    }

    let plain = payload.password;
    let password_hash = blocking(move || password::hash_password(&plain)).await?;
    let user = state.users.insert(username, &password_hash).await?;

    tracing::info!(user_id = user.user_id, username = %user.username, "Account created");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::ok("Account created successfully")),
    ))
}

/// Log in a cashier
///
/// Opens a session and sets the session cookie.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = AuthResponse),
        (status = 401, description = "Unknown user or wrong password")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let username = payload.username.trim().to_string();
    let found = state.users.find_by_username(&username).await?;

    // Unknown users still pay for a full hash check
    let plain = payload.password;
    let stored = found.as_ref().map(|user| user.password_hash.clone());
    let verified = blocking(move || match stored {
        Some(stored) => password::verify_password(&plain, &stored),
        None => password::verify_unknown_user(&plain),
    })
    .await?;

    let user = match found {
        Some(user) if verified => user,
        _ => {
            tracing::warn!(username = %username, "Rejected login");
            return Err(AppError::Unauthorized);
        }
    };

    let identity = UserIdentity {
        user_id: user.user_id,
        username: user.username,
    };
    let token = state.sessions.create(&identity).await?;

    tracing::info!(user_id = identity.user_id, "User logged in");

    Ok((
        [(header::SET_COOKIE, state.session_settings.cookie(&token))],
        Json(AuthResponse {
            success: true,
            message: "Login successful".to_string(),
            user: identity,
        }),
    ))
}

pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    if let Some(token) = session_token(&headers) {
        state.sessions.destroy(&token).await?;
    }

    Ok((
        [(header::SET_COOKIE, state.session_settings.expired_cookie())],
        Json(MessageResponse::ok("Logout successful")),
    ))
}

pub async fn session_status(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<SessionStatusResponse>, AppError> {
    let user = match session_token(&headers) {
        Some(token) => state.sessions.lookup(&token).await?,
        None => None,
    };

    Ok(Json(SessionStatusResponse {
        is_logged_in: user.is_some(),
        user,
    }))
}

/// The identity behind the current session.
pub async fn me(auth: AuthContext) -> Json<UserIdentity> {
    Json(auth.identity)
}
