//! Workflow engine: the objective lifecycle rules.
//!
//! Every operation loads the actor's fresh `users` row by the
//! authenticated id before applying any rule, so ownership and
//! hierarchy checks never trust client-supplied data. Handlers stay
//! thin; all Validation/Conflict/Forbidden decisions live here.

pub mod adoption;
pub mod approval;
pub mod editing;
pub mod publish;
pub mod sharing;

use bigrocks_core::error::CoreError;
use bigrocks_core::types::DbId;
use bigrocks_db::models::user::User;
use bigrocks_db::repositories::{ObjectiveRepo, UserRepo};
use sqlx::PgPool;

use crate::error::{AppError, AppResult};

/// Load the acting user's current row.
///
/// A valid token whose user has since been deleted reads as 401, the
/// same as an invalid token.
pub async fn fetch_actor(pool: &PgPool, user_id: DbId) -> AppResult<User> {
    UserRepo::find_by_id(pool, user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))
}

/// Check that a referenced parent objective exists. A dangling id is a
/// client error, not a database one.
pub(crate) async fn ensure_parent_exists(
    pool: &PgPool,
    parent_id: Option<DbId>,
) -> AppResult<()> {
    if let Some(id) = parent_id {
        ObjectiveRepo::find_by_id(pool, id).await?.ok_or_else(|| {
            AppError::Core(CoreError::Validation("Parent objective not found".into()))
        })?;
    }
    Ok(())
}
