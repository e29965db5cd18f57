//! Route definitions for the `/strategic-priorities` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::strategic_priority;
use crate::state::AppState;

/// Routes mounted at `/strategic-priorities`.
///
/// ```text
/// GET    /        -> list (any authenticated user)
/// POST   /        -> create (admin only)
/// PUT    /{id}    -> update (admin only)
/// DELETE /{id}    -> delete (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(strategic_priority::list).post(strategic_priority::create),
        )
        .route(
            "/{id}",
            put(strategic_priority::update).delete(strategic_priority::delete),
        )
}
