//! Admin user management handlers.
//!
//! Creating a user hashes the password, stores a hashed verification
//! token, and emails the verification link in the background.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use bigrocks_core::error::CoreError;
use bigrocks_core::types::DbId;
use bigrocks_db::models::user::{CreateUser, UpdateUser};
use bigrocks_db::repositories::UserRepo;
use serde::Deserialize;
use validator::Validate;

use crate::auth::jwt::generate_opaque_token;
use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::handlers::auth::send_in_background;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /admin/users`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters long"))]
    pub password: String,
    pub title: Option<String>,
    #[validate(range(min = 1, message = "Level must be at least 1"))]
    pub level: i32,
    pub manager_id: Option<DbId>,
    #[serde(default)]
    pub admin: bool,
}

/// GET /api/v1/admin/users
pub async fn list_users(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: users }))
}

/// POST /api/v1/admin/users
pub async fn create_user(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    let (verification_token, verification_token_hash) = generate_opaque_token();

    let create = CreateUser {
        name: input.name,
        email: input.email,
        password_hash,
        title: input.title,
        level: input.level,
        manager_id: input.manager_id,
        admin: input.admin,
        verification_token_hash: Some(verification_token_hash),
    };
    let user = UserRepo::create(&state.pool, &create).await?;

    let email = user.email.clone();
    send_in_background(Arc::clone(&state.mailer), move |mailer| async move {
        mailer.send_verification(&email, &verification_token).await
    });

    tracing::info!(user_id = user.id, "User created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: user })))
}

/// PUT /api/v1/admin/users/{id}
pub async fn update_user(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUser>,
) -> AppResult<impl IntoResponse> {
    let updated = UserRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/admin/users/{id}
pub async fn delete_user(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !UserRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }
    Ok(StatusCode::NO_CONTENT)
}
