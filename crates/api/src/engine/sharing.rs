//! Peer-to-peer sharing of a single objective.

use bigrocks_core::error::CoreError;
use bigrocks_core::types::DbId;
use bigrocks_db::models::user::User;
use bigrocks_db::repositories::{ObjectiveRepo, ShareRepo};
use serde::Serialize;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};

/// Result of a peer share.
#[derive(Debug, Serialize)]
pub struct ShareOutcome {
    pub shared: bool,
    /// Recipients newly covered by this share (previously covered ones
    /// are skipped silently).
    pub recipient_count: usize,
}

/// Offer one owned objective to an explicit set of peers.
///
/// Recipient sets union across calls: sharing with {A, B} and later
/// {B, C} covers {A, B, C} with B offered exactly once.
pub async fn share_with_peers(
    pool: &PgPool,
    actor: &User,
    objective_id: DbId,
    recipient_ids: &[DbId],
) -> AppResult<ShareOutcome> {
    let objective = ObjectiveRepo::find_by_id(pool, objective_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Objective",
            id: objective_id,
        }))?;

    if objective.owner_user_id != actor.id {
        return Err(AppError::Core(CoreError::Forbidden(
            "You can only share your own objectives".into(),
        )));
    }

    // Self-shares are dropped rather than rejected; a selection that
    // contained only the actor reads as empty.
    let recipients: Vec<DbId> = recipient_ids
        .iter()
        .copied()
        .filter(|id| *id != actor.id)
        .collect();
    if recipients.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Select at least one recipient".into(),
        )));
    }

    let Some((_, covered)) =
        ShareRepo::create_event_with_recipients(pool, objective_id, actor.id, &recipients).await?
    else {
        return Err(AppError::Core(CoreError::Conflict(
            "Objective already shared with all selected recipients".into(),
        )));
    };

    tracing::info!(
        user_id = actor.id,
        objective_id,
        recipient_count = covered.len(),
        "Objective shared with peers"
    );

    Ok(ShareOutcome {
        shared: true,
        recipient_count: covered.len(),
    })
}
