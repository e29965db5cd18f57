//! Handlers for the `/auth` resource (login, me, credential flows).

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use bigrocks_core::error::CoreError;
use bigrocks_core::types::DbId;
use bigrocks_db::repositories::UserRepo;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::{generate_access_token, generate_opaque_token, hash_token};
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::email::Mailer;
use crate::engine::fetch_actor;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Minimum password length accepted by the reset flow.
const MIN_PASSWORD_LENGTH: usize = 8;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/forgot-password`.
#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Request body for `POST /auth/reset-password`.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub password: String,
}

/// Request body for `POST /auth/verify-email`.
#[derive(Debug, Deserialize)]
pub struct VerifyEmailRequest {
    pub token: String,
}

/// Successful authentication response.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserInfo,
}

/// Public user info embedded in [`AuthResponse`].
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub title: Option<String>,
    pub level: i32,
    pub admin: bool,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Authenticate with email + password. Requires a verified email
/// address. Returns a bearer access token.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
        })?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid email or password".into(),
        )));
    }

    if !user.email_verified {
        return Err(AppError::Core(CoreError::Forbidden(
            "Email address has not been verified".into(),
        )));
    }

    let access_token = generate_access_token(user.id, user.admin, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(AuthResponse {
        access_token,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        user: UserInfo {
            id: user.id,
            name: user.name,
            email: user.email,
            title: user.title,
            level: user.level,
            admin: user.admin,
        },
    }))
}

/// GET /api/v1/auth/me
///
/// The authenticated user's own profile.
pub async fn me(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<bigrocks_db::models::user::User>>> {
    let user = fetch_actor(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: user }))
}

/// POST /api/v1/auth/forgot-password
///
/// Start the password-reset flow. Always reports success so the
/// endpoint cannot be used to probe which addresses exist.
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(input): Json<ForgotPasswordRequest>,
) -> AppResult<Json<DataResponse<serde_json::Value>>> {
    if let Some(user) = UserRepo::find_by_email(&state.pool, &input.email).await? {
        let (plaintext, token_hash) = generate_opaque_token();
        let expires =
            Utc::now() + chrono::Duration::minutes(state.config.jwt.reset_token_expiry_mins);
        UserRepo::set_reset_token(&state.pool, user.id, &token_hash, expires).await?;
        send_in_background(Arc::clone(&state.mailer), move |mailer| async move {
            mailer.send_password_reset(&user.email, &plaintext).await
        });
    }

    Ok(Json(DataResponse {
        data: serde_json::json!({
            "message": "If that address exists, a reset email has been sent"
        }),
    }))
}

/// POST /api/v1/auth/reset-password
///
/// Complete the password-reset flow with a still-valid token.
pub async fn reset_password(
    State(state): State<AppState>,
    Json(input): Json<ResetPasswordRequest>,
) -> AppResult<Json<DataResponse<serde_json::Value>>> {
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|e| AppError::Core(CoreError::Validation(e)))?;

    let token_hash = hash_token(&input.token);
    let user = UserRepo::find_by_reset_token(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired reset token".into(),
            ))
        })?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    UserRepo::update_password(&state.pool, user.id, &password_hash).await?;

    tracing::info!(user_id = user.id, "Password reset completed");

    Ok(Json(DataResponse {
        data: serde_json::json!({ "message": "Password updated" }),
    }))
}

/// POST /api/v1/auth/verify-email
///
/// Confirm a new account's email address.
pub async fn verify_email(
    State(state): State<AppState>,
    Json(input): Json<VerifyEmailRequest>,
) -> AppResult<Json<DataResponse<serde_json::Value>>> {
    let token_hash = hash_token(&input.token);
    let user = UserRepo::find_by_verification_token(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid verification token".into()))
        })?;

    UserRepo::verify_email(&state.pool, user.id).await?;

    tracing::info!(user_id = user.id, "Email verified");

    Ok(Json(DataResponse {
        data: serde_json::json!({ "message": "Email verified" }),
    }))
}

/// Spawn an email send without blocking the response.
pub(crate) fn send_in_background<F, Fut>(mailer: Arc<Mailer>, send: F)
where
    F: FnOnce(Arc<Mailer>) -> Fut + Send + 'static,
    Fut: std::future::Future<Output = AppResult<()>> + Send,
{
    tokio::spawn(async move {
        if let Err(e) = send(mailer).await {
            tracing::warn!(error = %e, "Background email send failed");
        }
    });
}
