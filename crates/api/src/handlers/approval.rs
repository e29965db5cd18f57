//! Handlers for the `/approvals` resource: a manager's pending queue
//! and the approve/reject decisions.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use bigrocks_core::grouping::group_single_owner;
use bigrocks_core::types::DbId;
use bigrocks_db::repositories::ObjectiveRepo;
use serde::Deserialize;

use crate::engine::{self, fetch_actor};
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for approve: optional comments plus the adopt flag.
#[derive(Debug, Deserialize, Default)]
pub struct ApproveRequest {
    pub comments: Option<String>,
    #[serde(default)]
    pub adopt: bool,
}

/// Request body for reject.
#[derive(Debug, Deserialize, Default)]
pub struct RejectRequest {
    pub comments: Option<String>,
}

/// GET /api/v1/approvals
///
/// Direct reports' objectives still awaiting a decision, grouped.
pub async fn list_pending(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let pending = ObjectiveRepo::list_pending_for_manager(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse {
        data: group_single_owner(pending),
    }))
}

/// POST /api/v1/approvals/{objective_id}/approve
pub async fn approve(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(objective_id): Path<DbId>,
    Json(input): Json<ApproveRequest>,
) -> AppResult<impl IntoResponse> {
    let actor = fetch_actor(&state.pool, auth.user_id).await?;
    let outcome = engine::approval::approve(
        &state.pool,
        &actor,
        objective_id,
        input.comments.as_deref(),
        input.adopt,
    )
    .await?;
    Ok(Json(DataResponse { data: outcome }))
}

/// POST /api/v1/approvals/{objective_id}/reject
pub async fn reject(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(objective_id): Path<DbId>,
    Json(input): Json<RejectRequest>,
) -> AppResult<impl IntoResponse> {
    let actor = fetch_actor(&state.pool, auth.user_id).await?;
    let outcome = engine::approval::reject(
        &state.pool,
        &actor,
        objective_id,
        input.comments.as_deref(),
    )
    .await?;
    Ok(Json(DataResponse { data: outcome }))
}
