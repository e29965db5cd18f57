//! Creating, editing, re-parenting, and deleting owned objectives.
//!
//! The lock rule: once the owner has ever shared an objective (to
//! peers, to the team, or as an approval request), it can no longer be
//! edited or deleted by anyone. Approval additionally freezes edits.

use bigrocks_core::error::CoreError;
use bigrocks_core::objective::{auto_approved, validate_kind, ObjectiveKind};
use bigrocks_core::types::DbId;
use bigrocks_db::models::objective::{CreateObjective, Objective, UpdateObjective};
use bigrocks_db::models::user::User;
use bigrocks_db::repositories::{ObjectiveRepo, ShareRepo};
use sqlx::PgPool;

use crate::error::{AppError, AppResult};

/// Parameters for creating a new objective.
#[derive(Debug, Clone)]
pub struct NewObjective {
    pub name: String,
    pub kind: String,
    pub description: Option<String>,
    pub metric: Option<String>,
    pub strategic_priority_id: Option<DbId>,
    pub parent_id: Option<DbId>,
}

/// Create an objective owned by the actor.
///
/// Levels 1 and 2 self-approve at creation; everyone else starts
/// unapproved and goes through the request-approval flow.
pub async fn create_objective(
    pool: &PgPool,
    actor: &User,
    input: NewObjective,
) -> AppResult<Objective> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Objective name is required".into(),
        )));
    }
    let kind = validate_kind(&input.kind).map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    super::ensure_parent_exists(pool, input.parent_id).await?;

    let create = CreateObjective {
        name: input.name,
        kind,
        description: input.description,
        metric: input.metric,
        strategic_priority_id: input.strategic_priority_id,
        parent_id: input.parent_id,
        owner_user_id: actor.id,
        received_from_user_id: None,
        approved: auto_approved(actor.level),
    };
    let created = ObjectiveRepo::create(pool, &create).await?;

    tracing::info!(
        user_id = actor.id,
        objective_id = created.id,
        kind = %created.kind,
        "Objective created"
    );

    Ok(created)
}

/// Resolve an objective and check the actor owns it.
async fn authorize_owner(
    pool: &PgPool,
    actor: &User,
    objective_id: DbId,
) -> AppResult<Objective> {
    let objective = ObjectiveRepo::find_by_id(pool, objective_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Objective",
            id: objective_id,
        }))?;

    if objective.owner_user_id != actor.id {
        return Err(AppError::Core(CoreError::Forbidden(
            "You can only modify your own objectives".into(),
        )));
    }

    Ok(objective)
}

/// Whether the owner has ever shared this objective.
async fn is_locked(pool: &PgPool, objective: &Objective) -> AppResult<bool> {
    let offered =
        ShareRepo::recipients_already_offered(pool, objective.id, objective.owner_user_id).await?;
    Ok(!offered.is_empty())
}

/// Apply a partial update to an owned objective.
pub async fn update_objective(
    pool: &PgPool,
    actor: &User,
    objective_id: DbId,
    input: UpdateObjective,
) -> AppResult<Objective> {
    let objective = authorize_owner(pool, actor, objective_id).await?;

    if is_locked(pool, &objective).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "Objective has been shared and can no longer be edited".into(),
        )));
    }
    if objective.approved {
        return Err(AppError::Core(CoreError::Conflict(
            "Approved objectives can no longer be edited".into(),
        )));
    }
    if let Some(kind) = &input.kind {
        validate_kind(kind).map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    }

    let updated = ObjectiveRepo::update(pool, objective_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Objective",
            id: objective_id,
        }))?;

    tracing::info!(user_id = actor.id, objective_id, "Objective updated");
    Ok(updated)
}

/// Delete an owned, never-shared objective.
pub async fn delete_objective(pool: &PgPool, actor: &User, objective_id: DbId) -> AppResult<()> {
    let objective = authorize_owner(pool, actor, objective_id).await?;

    if is_locked(pool, &objective).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "Objective has been shared and can no longer be deleted".into(),
        )));
    }

    ObjectiveRepo::delete(pool, objective_id).await?;
    tracing::info!(user_id = actor.id, objective_id, "Objective deleted");
    Ok(())
}

/// Assign or clear an initiative's parent Big Rock.
pub async fn assign_parent(
    pool: &PgPool,
    actor: &User,
    objective_id: DbId,
    parent_id: Option<DbId>,
) -> AppResult<Objective> {
    let objective = authorize_owner(pool, actor, objective_id).await?;

    if objective.objective_kind() != ObjectiveKind::RiskCriticalInitiative {
        return Err(AppError::Core(CoreError::Validation(
            "Only initiatives can be assigned a parent".into(),
        )));
    }
    super::ensure_parent_exists(pool, parent_id).await?;

    let updated = ObjectiveRepo::set_parent(pool, objective_id, parent_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Objective",
            id: objective_id,
        }))?;

    tracing::info!(
        user_id = actor.id,
        objective_id,
        parent_id = ?parent_id,
        "Objective parent changed"
    );
    Ok(updated)
}
