//! Handler for the `/team` rollup view.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use bigrocks_core::error::CoreError;
use bigrocks_core::grouping::group_by_parent;
use bigrocks_db::models::objective::TeamObjective;
use bigrocks_db::repositories::{ObjectiveRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/team
///
/// Every objective owned by the actor's transitive reports, grouped.
/// The grouping is owner-scoped: an initiative only attaches to a Big
/// Rock owned by the same person, so two reports' hierarchies never
/// merge even if ids happen to line up.
pub async fn team_view(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    if !UserRepo::has_reportees(&state.pool, auth.user_id).await? {
        return Err(AppError::Core(CoreError::Validation(
            "You have no team to view".into(),
        )));
    }

    let rollup = ObjectiveRepo::list_team_rollup(&state.pool, auth.user_id).await?;
    let grouped = group_by_parent(rollup, |root: &TeamObjective, leaf: &TeamObjective| {
        root.owner_user_id == leaf.owner_user_id
    });

    Ok(Json(DataResponse { data: grouped }))
}
