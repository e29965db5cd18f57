//! Route definitions for the admin user management resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at `/admin/users` (all admin only).
///
/// ```text
/// GET    /        -> list users
/// POST   /        -> create user (sends verification email)
/// PUT    /{id}    -> update user
/// DELETE /{id}    -> delete user
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(user::list_users).post(user::create_user))
        .route("/{id}", put(user::update_user).delete(user::delete_user))
}
