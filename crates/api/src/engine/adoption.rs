//! Accepting or ignoring an incoming share.
//!
//! Adopting copies the shared objective into the recipient's own set
//! with provenance; ignoring just closes the offer. Both decisions are
//! terminal for the recipient row.

use bigrocks_core::error::CoreError;
use bigrocks_core::objective::{auto_approved, ObjectiveKind};
use bigrocks_core::share::Acceptance;
use bigrocks_core::types::DbId;
use bigrocks_db::models::objective::{CreateObjective, Objective};
use bigrocks_db::models::share::ShareRecipient;
use bigrocks_db::models::user::User;
use bigrocks_db::repositories::{ObjectiveRepo, ShareRepo};
use sqlx::PgPool;

use crate::error::{AppError, AppResult};

/// Resolve the recipient row and check it targets the actor.
async fn authorize_recipient(
    pool: &PgPool,
    actor: &User,
    recipient_id: DbId,
) -> AppResult<ShareRecipient> {
    let recipient = ShareRepo::find_recipient(pool, recipient_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Share",
            id: recipient_id,
        }))?;

    if recipient.to_user_id != actor.id {
        return Err(AppError::Core(CoreError::Forbidden(
            "This share was not addressed to you".into(),
        )));
    }

    Ok(recipient)
}

/// Adopt a shared objective as the actor's own copy.
///
/// The copy records where it came from and self-approves when the
/// actor's level does. `parent_id` only applies when adopting as an
/// initiative; a Big Rock has no parent.
///
/// Priority inheritance: a shared initiative adopted as a Big Rock
/// takes its parent Big Rock's strategic priority; every other
/// combination keeps the subject's own priority.
pub async fn adopt(
    pool: &PgPool,
    actor: &User,
    recipient_id: DbId,
    as_kind: ObjectiveKind,
    parent_id: Option<DbId>,
) -> AppResult<Objective> {
    let recipient = authorize_recipient(pool, actor, recipient_id).await?;

    let event = ShareRepo::find_event_with_objective(pool, recipient.share_event_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ShareEvent",
            id: recipient.share_event_id,
        }))?;

    // The chosen parent must resolve before the offer is marked
    // decided, otherwise a bad id would consume the offer with no copy
    // to show for it.
    let parent_id = match as_kind {
        ObjectiveKind::RiskCriticalInitiative => {
            super::ensure_parent_exists(pool, parent_id).await?;
            parent_id
        }
        ObjectiveKind::BigRock => None,
    };

    // Re-accepting an accepted share is allowed (and creates another
    // copy); flipping an ignored share is not.
    if !ShareRepo::set_acceptance(pool, recipient_id, Acceptance::Accepted).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "This share has already been dismissed".into(),
        )));
    }

    let subject_kind =
        ObjectiveKind::parse(&event.objective_kind).unwrap_or(ObjectiveKind::BigRock);
    let strategic_priority_id = if subject_kind == ObjectiveKind::RiskCriticalInitiative
        && as_kind == ObjectiveKind::BigRock
    {
        event.parent_strategic_priority_id
    } else {
        event.objective_strategic_priority_id
    };

    let copy = CreateObjective {
        name: event.objective_name.clone(),
        kind: as_kind,
        description: event.objective_description.clone(),
        metric: event.objective_metric.clone(),
        strategic_priority_id,
        parent_id,
        owner_user_id: actor.id,
        received_from_user_id: Some(event.from_user_id),
        approved: auto_approved(actor.level),
    };
    let created = ObjectiveRepo::create(pool, &copy).await?;

    tracing::info!(
        user_id = actor.id,
        recipient_id,
        objective_id = created.id,
        from_user_id = event.from_user_id,
        "Share adopted"
    );

    Ok(created)
}

/// Dismiss an incoming share without adopting it.
pub async fn ignore(pool: &PgPool, actor: &User, recipient_id: DbId) -> AppResult<()> {
    authorize_recipient(pool, actor, recipient_id).await?;

    if !ShareRepo::set_acceptance(pool, recipient_id, Acceptance::Ignored).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "This share has already been adopted".into(),
        )));
    }

    tracing::info!(user_id = actor.id, recipient_id, "Share ignored");
    Ok(())
}
