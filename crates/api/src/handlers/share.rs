//! Handlers for the `/shares` resource: incoming offers and the
//! adopt/ignore decisions.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use bigrocks_core::error::CoreError;
use bigrocks_core::grouping::group_single_owner;
use bigrocks_core::objective::validate_kind;
use bigrocks_core::types::DbId;
use bigrocks_db::repositories::{ShareRepo, UserRepo};
use serde::Deserialize;

use crate::engine::{self, fetch_actor};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for adopt: the kind the copy should take and, when
/// adopting as an initiative, an optional parent Big Rock.
#[derive(Debug, Deserialize)]
pub struct AdoptRequest {
    #[serde(rename = "type")]
    pub kind: String,
    pub parent_id: Option<DbId>,
}

/// GET /api/v1/shares/incoming
///
/// Pending peer offers addressed to the actor, grouped. Offers from the
/// actor's own chain are excluded: a report's approval request belongs
/// to the approval queue and the manager's cascade to `/from-manager`.
pub async fn incoming(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let actor = fetch_actor(&state.pool, auth.user_id).await?;

    let mut hierarchy: Vec<DbId> = UserRepo::list_by_manager(&state.pool, actor.id)
        .await?
        .into_iter()
        .map(|u| u.id)
        .collect();
    hierarchy.extend(actor.manager_id);

    let shares = ShareRepo::list_incoming(&state.pool, actor.id, &hierarchy).await?;
    Ok(Json(DataResponse {
        data: group_single_owner(shares),
    }))
}

/// GET /api/v1/shares/from-manager
///
/// Everything the actor's manager has cascaded to them, grouped.
/// Decided offers stay visible here so the cascade remains browsable.
pub async fn from_manager(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let actor = fetch_actor(&state.pool, auth.user_id).await?;
    let manager_id = actor.manager_id.ok_or_else(|| {
        AppError::Core(CoreError::Validation("You have no manager".into()))
    })?;

    let shares = ShareRepo::list_incoming_from(&state.pool, auth.user_id, manager_id).await?;
    Ok(Json(DataResponse {
        data: group_single_owner(shares),
    }))
}

/// POST /api/v1/shares/{recipient_id}/adopt
pub async fn adopt(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(recipient_id): Path<DbId>,
    Json(input): Json<AdoptRequest>,
) -> AppResult<impl IntoResponse> {
    let actor = fetch_actor(&state.pool, auth.user_id).await?;
    let kind = validate_kind(&input.kind).map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    let created =
        engine::adoption::adopt(&state.pool, &actor, recipient_id, kind, input.parent_id).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// POST /api/v1/shares/{recipient_id}/ignore
pub async fn ignore(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(recipient_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let actor = fetch_actor(&state.pool, auth.user_id).await?;
    engine::adoption::ignore(&state.pool, &actor, recipient_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
