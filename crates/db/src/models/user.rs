//! User models.

use bigrocks_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `users` table.
///
/// The workflow core treats users as read-only shared state; rows are
/// created and edited only through the admin endpoints and the
/// credential flows.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub title: Option<String>,
    /// 1 = top of the management hierarchy, increasing downward.
    pub level: i32,
    pub manager_id: Option<DbId>,
    pub admin: bool,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub email_verified: bool,
    #[serde(skip_serializing)]
    pub verification_token_hash: Option<String>,
    #[serde(skip_serializing)]
    pub reset_token_hash: Option<String>,
    #[serde(skip_serializing)]
    pub reset_token_expires: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for creating a new user.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub title: Option<String>,
    pub level: i32,
    pub manager_id: Option<DbId>,
    pub admin: bool,
    pub verification_token_hash: Option<String>,
}

/// DTO for partial user updates. Only non-`None` fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub title: Option<String>,
    pub level: Option<i32>,
    pub manager_id: Option<DbId>,
    pub admin: Option<bool>,
}
