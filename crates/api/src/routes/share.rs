//! Route definitions for the `/shares` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::share;
use crate::state::AppState;

/// Routes mounted at `/shares`.
///
/// ```text
/// GET  /incoming                -> pending peer offers, grouped
/// GET  /from-manager            -> manager's cascade, grouped
/// POST /{recipient_id}/adopt    -> adopt as own copy
/// POST /{recipient_id}/ignore   -> dismiss
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/incoming", get(share::incoming))
        .route("/from-manager", get(share::from_manager))
        .route("/{recipient_id}/adopt", post(share::adopt))
        .route("/{recipient_id}/ignore", post(share::ignore))
}
