//! Route definitions for the `/approvals` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::approval;
use crate::state::AppState;

/// Routes mounted at `/approvals`.
///
/// ```text
/// GET  /                           -> grouped pending queue
/// POST /{objective_id}/approve     -> approve (owner's manager only)
/// POST /{objective_id}/reject      -> reject (owner's manager only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(approval::list_pending))
        .route("/{objective_id}/approve", post(approval::approve))
        .route("/{objective_id}/reject", post(approval::reject))
}
