//! Handlers for the `/objectives` resource: the owner's own view plus
//! the workflow actions that start from it (create, edit, share,
//! publish, request approval).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use bigrocks_core::error::CoreError;
use bigrocks_core::grouping::{group_single_owner, GroupedObjectives};
use bigrocks_core::types::DbId;
use bigrocks_db::models::objective::{ObjectiveWithDetails, UpdateObjective};
use bigrocks_db::models::share::OutgoingShare;
use bigrocks_db::repositories::{ObjectiveRepo, ShareRepo};
use serde::{Deserialize, Serialize};

use crate::engine::{self, fetch_actor};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /objectives`.
#[derive(Debug, Deserialize)]
pub struct CreateObjectiveRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: Option<String>,
    pub metric: Option<String>,
    pub strategic_priority_id: Option<DbId>,
    pub parent_id: Option<DbId>,
}

/// Request body for `PUT /objectives/{id}/parent`.
#[derive(Debug, Deserialize)]
pub struct SetParentRequest {
    pub parent_id: Option<DbId>,
}

/// Request body for `POST /objectives/{id}/share`.
#[derive(Debug, Deserialize)]
pub struct ShareRequest {
    pub recipient_ids: Vec<DbId>,
}

/// The owner's objectives view: grouped hierarchy plus everything the
/// owner has shared out.
#[derive(Debug, Serialize)]
pub struct ObjectivesView {
    pub objectives: GroupedObjectives<ObjectiveWithDetails>,
    pub outgoing_shares: Vec<OutgoingShare>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/objectives
///
/// The actor's own objectives, grouped Big Rocks first with child
/// initiatives attached, plus their outgoing shares.
pub async fn list_objectives(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<ObjectivesView>>> {
    let details = ObjectiveRepo::list_by_owner_with_details(&state.pool, auth.user_id).await?;
    let outgoing = ShareRepo::list_outgoing(&state.pool, auth.user_id).await?;

    Ok(Json(DataResponse {
        data: ObjectivesView {
            objectives: group_single_owner(details),
            outgoing_shares: outgoing,
        },
    }))
}

/// POST /api/v1/objectives
pub async fn create_objective(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateObjectiveRequest>,
) -> AppResult<impl IntoResponse> {
    let actor = fetch_actor(&state.pool, auth.user_id).await?;
    let created = engine::editing::create_objective(
        &state.pool,
        &actor,
        engine::editing::NewObjective {
            name: input.name,
            kind: input.kind,
            description: input.description,
            metric: input.metric,
            strategic_priority_id: input.strategic_priority_id,
            parent_id: input.parent_id,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// GET /api/v1/objectives/{id}
pub async fn get_objective(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let objective = ObjectiveRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Objective",
            id,
        }))?;

    if objective.owner_user_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "You can only view your own objectives".into(),
        )));
    }

    Ok(Json(DataResponse { data: objective }))
}

/// PUT /api/v1/objectives/{id}
pub async fn update_objective(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateObjective>,
) -> AppResult<impl IntoResponse> {
    let actor = fetch_actor(&state.pool, auth.user_id).await?;
    let updated = engine::editing::update_objective(&state.pool, &actor, id, input).await?;
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/objectives/{id}
pub async fn delete_objective(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let actor = fetch_actor(&state.pool, auth.user_id).await?;
    engine::editing::delete_objective(&state.pool, &actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/objectives/{id}/parent
pub async fn set_parent(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SetParentRequest>,
) -> AppResult<impl IntoResponse> {
    let actor = fetch_actor(&state.pool, auth.user_id).await?;
    let updated = engine::editing::assign_parent(&state.pool, &actor, id, input.parent_id).await?;
    Ok(Json(DataResponse { data: updated }))
}

/// POST /api/v1/objectives/{id}/share
pub async fn share(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ShareRequest>,
) -> AppResult<impl IntoResponse> {
    let actor = fetch_actor(&state.pool, auth.user_id).await?;
    let outcome =
        engine::sharing::share_with_peers(&state.pool, &actor, id, &input.recipient_ids).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: outcome })))
}

/// POST /api/v1/objectives/publish
pub async fn publish(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let actor = fetch_actor(&state.pool, auth.user_id).await?;
    let outcome = engine::publish::publish_down(&state.pool, &actor).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: outcome })))
}

/// POST /api/v1/objectives/request-approval
pub async fn request_approval(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let actor = fetch_actor(&state.pool, auth.user_id).await?;
    let outcome = engine::publish::request_approval(&state.pool, &actor).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: outcome })))
}
