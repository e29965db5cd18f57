//! Repository for the `strategic_priorities` table.

use bigrocks_core::types::DbId;
use sqlx::PgPool;

use crate::models::strategic_priority::{
    CreateStrategicPriority, StrategicPriority, UpdateStrategicPriority,
};

/// Column list shared across queries.
const COLUMNS: &str = "id, name, description, created_at";

/// Provides CRUD operations for the strategic priority taxonomy.
pub struct StrategicPriorityRepo;

impl StrategicPriorityRepo {
    /// List all strategic priorities, ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<StrategicPriority>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM strategic_priorities ORDER BY name");
        sqlx::query_as::<_, StrategicPriority>(&query)
            .fetch_all(pool)
            .await
    }

    /// Find a strategic priority by its ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<StrategicPriority>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM strategic_priorities WHERE id = $1");
        sqlx::query_as::<_, StrategicPriority>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new strategic priority, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateStrategicPriority,
    ) -> Result<StrategicPriority, sqlx::Error> {
        let query = format!(
            "INSERT INTO strategic_priorities (name, description)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StrategicPriority>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Update a strategic priority. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateStrategicPriority,
    ) -> Result<Option<StrategicPriority>, sqlx::Error> {
        let query = format!(
            "UPDATE strategic_priorities SET
                name = COALESCE($2, name),
                description = COALESCE($3, description)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StrategicPriority>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Delete a strategic priority. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM strategic_priorities WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
