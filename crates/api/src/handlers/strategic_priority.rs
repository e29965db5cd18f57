//! Handlers for the strategic priority taxonomy. Reading is open to
//! any authenticated user; writes are admin-only.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use bigrocks_core::error::CoreError;
use bigrocks_core::types::DbId;
use bigrocks_db::models::strategic_priority::{CreateStrategicPriority, UpdateStrategicPriority};
use bigrocks_db::repositories::StrategicPriorityRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/strategic-priorities
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let priorities = StrategicPriorityRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: priorities }))
}

/// POST /api/v1/strategic-priorities (admin)
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateStrategicPriority>,
) -> AppResult<impl IntoResponse> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Priority name is required".into(),
        )));
    }
    let created = StrategicPriorityRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// PUT /api/v1/strategic-priorities/{id} (admin)
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStrategicPriority>,
) -> AppResult<impl IntoResponse> {
    let updated = StrategicPriorityRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "StrategicPriority",
            id,
        }))?;
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/strategic-priorities/{id} (admin)
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !StrategicPriorityRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "StrategicPriority",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
