//! Manager decisions on a report's objectives.

use bigrocks_core::error::CoreError;
use bigrocks_core::objective::auto_approved;
use bigrocks_core::types::DbId;
use bigrocks_db::models::objective::CreateObjective;
use bigrocks_db::models::user::User;
use bigrocks_db::repositories::{ObjectiveRepo, UserRepo};
use serde::Serialize;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};

/// Result of an approve/reject decision.
#[derive(Debug, Serialize)]
pub struct DecisionOutcome {
    pub approved: bool,
    pub rejected: bool,
    /// Whether the manager also copied the objective into their own set.
    pub adopted: bool,
}

/// Resolve the objective and check the actor manages its owner.
async fn authorize_decision(
    pool: &PgPool,
    actor: &User,
    objective_id: DbId,
) -> AppResult<bigrocks_db::models::objective::Objective> {
    let objective = ObjectiveRepo::find_by_id(pool, objective_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Objective",
            id: objective_id,
        }))?;

    let owner = UserRepo::find_by_id(pool, objective.owner_user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: objective.owner_user_id,
        }))?;

    if owner.manager_id != Some(actor.id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the owner's manager can decide on this objective".into(),
        )));
    }

    Ok(objective)
}

/// Approve a report's objective, optionally adopting a copy of it.
///
/// The adopted copy keeps the kind, fields, and parent but carries no
/// provenance; it is the manager's own objective from then on, approved
/// up front when the manager's level self-approves.
pub async fn approve(
    pool: &PgPool,
    actor: &User,
    objective_id: DbId,
    comments: Option<&str>,
    adopt: bool,
) -> AppResult<DecisionOutcome> {
    let objective = authorize_decision(pool, actor, objective_id).await?;

    ObjectiveRepo::set_approved(pool, objective_id, comments)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Objective",
            id: objective_id,
        }))?;

    if adopt {
        let copy = CreateObjective {
            name: objective.name.clone(),
            kind: objective.objective_kind(),
            description: objective.description.clone(),
            metric: objective.metric.clone(),
            strategic_priority_id: objective.strategic_priority_id,
            parent_id: objective.parent_id,
            owner_user_id: actor.id,
            received_from_user_id: None,
            approved: auto_approved(actor.level),
        };
        ObjectiveRepo::create(pool, &copy).await?;
    }

    tracing::info!(
        user_id = actor.id,
        objective_id,
        adopted = adopt,
        "Objective approved"
    );

    Ok(DecisionOutcome {
        approved: true,
        rejected: false,
        adopted: adopt,
    })
}

/// Reject a report's objective with optional comments.
///
/// The rejected flag stays set until the manager approves; edits by the
/// owner do not clear it.
pub async fn reject(
    pool: &PgPool,
    actor: &User,
    objective_id: DbId,
    comments: Option<&str>,
) -> AppResult<DecisionOutcome> {
    authorize_decision(pool, actor, objective_id).await?;

    ObjectiveRepo::set_rejected(pool, objective_id, comments)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Objective",
            id: objective_id,
        }))?;

    tracing::info!(user_id = actor.id, objective_id, "Objective rejected");

    Ok(DecisionOutcome {
        approved: false,
        rejected: true,
        adopted: false,
    })
}
