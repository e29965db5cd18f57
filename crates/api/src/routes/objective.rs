//! Route definitions for the `/objectives` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::objective;
use crate::state::AppState;

/// Routes mounted at `/objectives`.
///
/// ```text
/// GET    /                    -> grouped own view + outgoing shares
/// POST   /                    -> create
/// GET    /{id}                -> get (owner only)
/// PUT    /{id}                -> update (owner only, unlocked)
/// DELETE /{id}                -> delete (owner only, unlocked)
/// PUT    /{id}/parent         -> assign/clear parent (initiatives only)
/// POST   /{id}/share          -> share with peers
/// POST   /publish             -> publish everything to direct reports
/// POST   /request-approval    -> submit unapproved objectives upward
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(objective::list_objectives).post(objective::create_objective),
        )
        .route(
            "/{id}",
            get(objective::get_objective)
                .put(objective::update_objective)
                .delete(objective::delete_objective),
        )
        .route("/{id}/parent", put(objective::set_parent))
        .route("/{id}/share", post(objective::share))
        .route("/publish", post(objective::publish))
        .route("/request-approval", post(objective::request_approval))
}
