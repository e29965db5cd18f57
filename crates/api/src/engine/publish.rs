//! Publishing objectives down the management chain and requesting
//! approval up it. Both are ledger fan-outs; they differ only in who
//! the recipients are.

use bigrocks_core::error::CoreError;
use bigrocks_core::objective::requires_approval;
use bigrocks_core::types::DbId;
use bigrocks_db::models::user::User;
use bigrocks_db::repositories::{ObjectiveRepo, ShareRepo, UserRepo};
use serde::Serialize;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};

/// Result of a publish-to-team fan-out.
#[derive(Debug, Serialize)]
pub struct PublishOutcome {
    pub published: bool,
    /// Objectives the actor owns (all are offered).
    pub objective_count: usize,
    /// Direct reports the publish addressed.
    pub recipient_count: usize,
}

/// Result of an approval request fan-out.
#[derive(Debug, Serialize)]
pub struct RequestOutcome {
    pub requested: bool,
    /// Objectives newly submitted to the manager.
    pub objective_count: usize,
}

/// Offer every objective the actor owns to every direct report.
///
/// Idempotent per (objective, recipient): pairs already covered by an
/// earlier event are skipped, and if nothing anywhere is new the whole
/// call is a Conflict.
pub async fn publish_down(pool: &PgPool, actor: &User) -> AppResult<PublishOutcome> {
    let reportees = UserRepo::list_by_manager(pool, actor.id).await?;
    if reportees.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "You have no direct reports to publish to".into(),
        )));
    }

    let objectives = ObjectiveRepo::list_by_owner(pool, actor.id).await?;
    if objectives.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "You have no objectives to publish".into(),
        )));
    }

    let reportee_ids: Vec<DbId> = reportees.iter().map(|r| r.id).collect();

    let mut any_new = false;
    for objective in &objectives {
        let offered = ShareRepo::recipients_already_offered(pool, objective.id, actor.id).await?;
        let targets: Vec<DbId> = reportee_ids
            .iter()
            .copied()
            .filter(|id| !offered.contains(id))
            .collect();
        if targets.is_empty() {
            continue;
        }
        if ShareRepo::create_event_with_recipients(pool, objective.id, actor.id, &targets)
            .await?
            .is_some()
        {
            any_new = true;
        }
    }

    if !any_new {
        return Err(AppError::Core(CoreError::Conflict(
            "All objectives have already been published to your team".into(),
        )));
    }

    tracing::info!(
        user_id = actor.id,
        objective_count = objectives.len(),
        recipient_count = reportees.len(),
        "Objectives published to team"
    );

    Ok(PublishOutcome {
        published: true,
        objective_count: objectives.len(),
        recipient_count: reportees.len(),
    })
}

/// Submit the actor's unapproved objectives to their manager.
///
/// Levels 1 and 2 self-approve and never request; each unapproved
/// objective is offered to the manager at most once.
pub async fn request_approval(pool: &PgPool, actor: &User) -> AppResult<RequestOutcome> {
    if !requires_approval(actor.level) {
        return Err(AppError::Core(CoreError::Validation(
            "Your level does not require approval".into(),
        )));
    }
    let manager_id = actor.manager_id.ok_or_else(|| {
        AppError::Core(CoreError::Validation(
            "You have no manager to request approval from".into(),
        ))
    })?;

    let objectives = ObjectiveRepo::list_by_owner(pool, actor.id).await?;
    let unapproved: Vec<_> = objectives.into_iter().filter(|o| !o.approved).collect();
    if unapproved.is_empty() {
        return Err(AppError::Core(CoreError::Conflict(
            "You have no unapproved objectives to submit".into(),
        )));
    }

    let mut submitted = 0usize;
    for objective in &unapproved {
        let offered = ShareRepo::recipients_already_offered(pool, objective.id, actor.id).await?;
        if offered.contains(&manager_id) {
            continue;
        }
        if ShareRepo::create_event_with_recipients(pool, objective.id, actor.id, &[manager_id])
            .await?
            .is_some()
        {
            submitted += 1;
        }
    }

    if submitted == 0 {
        return Err(AppError::Core(CoreError::Conflict(
            "Approval has already been requested for all objectives".into(),
        )));
    }

    tracing::info!(
        user_id = actor.id,
        manager_id,
        objective_count = submitted,
        "Approval requested"
    );

    Ok(RequestOutcome {
        requested: true,
        objective_count: submitted,
    })
}
