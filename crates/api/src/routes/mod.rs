pub mod admin;
pub mod approval;
pub mod auth;
pub mod health;
pub mod objective;
pub mod share;
pub mod strategic_priority;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                          login (public)
/// /auth/me                             own profile
/// /auth/forgot-password                start password reset (public)
/// /auth/reset-password                 finish password reset (public)
/// /auth/verify-email                   confirm email address (public)
///
/// /objectives                          grouped own view, create
/// /objectives/{id}                     get, update, delete
/// /objectives/{id}/parent              assign/clear parent (PUT)
/// /objectives/{id}/share               share with peers (POST)
/// /objectives/publish                  publish to direct reports (POST)
/// /objectives/request-approval         submit upward (POST)
///
/// /approvals                           grouped pending queue
/// /approvals/{objective_id}/approve    approve, optionally adopt (POST)
/// /approvals/{objective_id}/reject     reject (POST)
///
/// /shares/incoming                     pending peer offers, grouped
/// /shares/from-manager                 manager's cascade, grouped
/// /shares/{recipient_id}/adopt         adopt as own copy (POST)
/// /shares/{recipient_id}/ignore        dismiss (POST)
///
/// /team                                transitive team rollup, grouped
///
/// /strategic-priorities                list; create/update/delete (admin)
///
/// /admin/users                         list, create (admin only)
/// /admin/users/{id}                    update, delete (admin only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication and credential flows.
        .nest("/auth", auth::router())
        // The owner's objectives and the workflow actions on them.
        .nest("/objectives", objective::router())
        // Manager decision queue.
        .nest("/approvals", approval::router())
        // Incoming shares and adoption.
        .nest("/shares", share::router())
        // Team rollup view.
        .route("/team", get(handlers::team::team_view))
        // Strategic priority taxonomy.
        .nest("/strategic-priorities", strategic_priority::router())
        // Admin user management.
        .nest("/admin/users", admin::router())
}
