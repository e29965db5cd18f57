//! Repository for the `objectives` table.

use bigrocks_core::objective::ObjectiveKind;
use bigrocks_core::types::DbId;
use sqlx::PgPool;

use crate::models::objective::{
    CreateObjective, Objective, ObjectiveWithDetails, PendingApproval, TeamObjective,
    UpdateObjective,
};

/// Column list shared across plain objective queries.
const COLUMNS: &str = "id, name, type, description, metric, strategic_priority_id, parent_id, \
    owner_user_id, received_from_user_id, approved, rejected, comments, created_at";

/// Joined column list for detail queries (`o` = objectives alias).
const DETAIL_COLUMNS: &str = "o.id, o.name, o.type, o.description, o.metric, \
    o.strategic_priority_id, sp.name AS strategic_priority_name, \
    o.parent_id, parent.name AS parent_name, \
    o.owner_user_id, o.received_from_user_id, \
    rf.name AS received_from_name, rf.title AS received_from_title, \
    o.approved, o.rejected, o.comments, o.created_at";

/// Provides CRUD and view queries for objectives.
pub struct ObjectiveRepo;

impl ObjectiveRepo {
    /// Insert a new objective, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateObjective) -> Result<Objective, sqlx::Error> {
        let query = format!(
            "INSERT INTO objectives
                (name, type, description, metric, strategic_priority_id, parent_id,
                 owner_user_id, received_from_user_id, approved)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Objective>(&query)
            .bind(&input.name)
            .bind(input.kind.as_str())
            .bind(&input.description)
            .bind(&input.metric)
            .bind(input.strategic_priority_id)
            .bind(input.parent_id)
            .bind(input.owner_user_id)
            .bind(input.received_from_user_id)
            .bind(input.approved)
            .fetch_one(pool)
            .await
    }

    /// Find an objective by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Objective>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM objectives WHERE id = $1");
        sqlx::query_as::<_, Objective>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all objectives owned by a user, newest first.
    pub async fn list_by_owner(pool: &PgPool, owner_user_id: DbId) -> Result<Vec<Objective>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM objectives
             WHERE owner_user_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Objective>(&query)
            .bind(owner_user_id)
            .fetch_all(pool)
            .await
    }

    /// List an owner's objectives with joined display fields, Big Rocks
    /// first within the owner's view.
    pub async fn list_by_owner_with_details(
        pool: &PgPool,
        owner_user_id: DbId,
    ) -> Result<Vec<ObjectiveWithDetails>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS}
             FROM objectives o
             LEFT JOIN users rf ON o.received_from_user_id = rf.id
             LEFT JOIN objectives parent ON o.parent_id = parent.id
             LEFT JOIN strategic_priorities sp ON o.strategic_priority_id = sp.id
             WHERE o.owner_user_id = $1
             ORDER BY o.type ASC, o.created_at DESC"
        );
        sqlx::query_as::<_, ObjectiveWithDetails>(&query)
            .bind(owner_user_id)
            .fetch_all(pool)
            .await
    }

    /// List an owner's objectives of a single kind, newest first.
    pub async fn list_by_owner_and_kind(
        pool: &PgPool,
        owner_user_id: DbId,
        kind: ObjectiveKind,
    ) -> Result<Vec<Objective>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM objectives
             WHERE owner_user_id = $1 AND type = $2
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Objective>(&query)
            .bind(owner_user_id)
            .bind(kind.as_str())
            .fetch_all(pool)
            .await
    }

    /// List direct reports' objectives that are neither approved nor
    /// rejected, with owner and display fields. Big Rocks first.
    pub async fn list_pending_for_manager(
        pool: &PgPool,
        manager_id: DbId,
    ) -> Result<Vec<PendingApproval>, sqlx::Error> {
        sqlx::query_as::<_, PendingApproval>(
            "SELECT o.id, o.name, o.type, o.description, o.metric,
                o.strategic_priority_id, sp.name AS strategic_priority_name,
                o.parent_id, parent.name AS parent_name,
                o.owner_user_id, u.name AS owner_name, u.title AS owner_title,
                o.approved, o.rejected, o.comments, o.created_at
             FROM objectives o
             JOIN users u ON o.owner_user_id = u.id
             LEFT JOIN strategic_priorities sp ON o.strategic_priority_id = sp.id
             LEFT JOIN objectives parent ON o.parent_id = parent.id
             WHERE u.manager_id = $1 AND o.approved = FALSE AND o.rejected = FALSE
             ORDER BY o.type ASC, o.created_at DESC",
        )
        .bind(manager_id)
        .fetch_all(pool)
        .await
    }

    /// List every objective owned by any transitive report of the
    /// manager, ordered by owner level/name, then kind, then recency.
    pub async fn list_team_rollup(
        pool: &PgPool,
        manager_id: DbId,
    ) -> Result<Vec<TeamObjective>, sqlx::Error> {
        sqlx::query_as::<_, TeamObjective>(
            "WITH RECURSIVE reportee_tree AS (
                SELECT id, name, title, level FROM users WHERE manager_id = $1
                UNION ALL
                SELECT u.id, u.name, u.title, u.level FROM users u
                INNER JOIN reportee_tree rt ON u.manager_id = rt.id
            )
            SELECT o.id, o.name, o.type, o.description, o.metric,
                o.strategic_priority_id, sp.name AS strategic_priority_name,
                o.parent_id, parent.name AS parent_name,
                o.approved, o.owner_user_id,
                rt.name AS owner_name, rt.title AS owner_title, rt.level AS owner_level,
                o.created_at
             FROM objectives o
             INNER JOIN reportee_tree rt ON o.owner_user_id = rt.id
             LEFT JOIN strategic_priorities sp ON o.strategic_priority_id = sp.id
             LEFT JOIN objectives parent ON o.parent_id = parent.id
             ORDER BY rt.level, rt.name, o.type, o.created_at DESC",
        )
        .bind(manager_id)
        .fetch_all(pool)
        .await
    }

    /// Update an objective. Only non-`None` fields in `input` are
    /// applied. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateObjective,
    ) -> Result<Option<Objective>, sqlx::Error> {
        let query = format!(
            "UPDATE objectives SET
                name = COALESCE($2, name),
                type = COALESCE($3, type),
                description = COALESCE($4, description),
                metric = COALESCE($5, metric),
                strategic_priority_id = COALESCE($6, strategic_priority_id)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Objective>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.kind)
            .bind(&input.description)
            .bind(&input.metric)
            .bind(input.strategic_priority_id)
            .fetch_optional(pool)
            .await
    }

    /// Reassign (or clear) an objective's parent.
    pub async fn set_parent(
        pool: &PgPool,
        id: DbId,
        parent_id: Option<DbId>,
    ) -> Result<Option<Objective>, sqlx::Error> {
        let query = format!(
            "UPDATE objectives SET parent_id = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Objective>(&query)
            .bind(id)
            .bind(parent_id)
            .fetch_optional(pool)
            .await
    }

    /// Mark an objective approved, storing reviewer comments if given.
    pub async fn set_approved(
        pool: &PgPool,
        id: DbId,
        comments: Option<&str>,
    ) -> Result<Option<Objective>, sqlx::Error> {
        let query = format!(
            "UPDATE objectives SET approved = TRUE, comments = COALESCE($2, comments)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Objective>(&query)
            .bind(id)
            .bind(comments)
            .fetch_optional(pool)
            .await
    }

    /// Mark an objective rejected, storing reviewer comments if given.
    /// The flag is never auto-cleared by later edits.
    pub async fn set_rejected(
        pool: &PgPool,
        id: DbId,
        comments: Option<&str>,
    ) -> Result<Option<Objective>, sqlx::Error> {
        let query = format!(
            "UPDATE objectives SET rejected = TRUE, comments = COALESCE($2, comments)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Objective>(&query)
            .bind(id)
            .bind(comments)
            .fetch_optional(pool)
            .await
    }

    /// Delete an objective. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM objectives WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
