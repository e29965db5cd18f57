//! Route definitions for the `/auth` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /login            -> login (public)
/// GET  /me               -> me (requires auth)
/// POST /forgot-password  -> forgot_password (public)
/// POST /reset-password   -> reset_password (public)
/// POST /verify-email     -> verify_email (public)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/me", get(auth::me))
        .route("/forgot-password", post(auth::forgot_password))
        .route("/reset-password", post(auth::reset_password))
        .route("/verify-email", post(auth::verify_email))
}
