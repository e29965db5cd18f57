//! Repository for the `users` table.

use bigrocks_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::user::{CreateUser, UpdateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, title, level, manager_id, admin, email, password_hash, \
    email_verified, verification_token_hash, reset_token_hash, reset_token_expires, created_at";

/// Provides CRUD and hierarchy queries for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users
                (name, email, password_hash, title, level, manager_id, admin, verification_token_hash)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.title)
            .bind(input.level)
            .bind(input.manager_id)
            .bind(input.admin)
            .bind(&input.verification_token_hash)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email (case-sensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List all users ordered by most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY created_at DESC");
        sqlx::query_as::<_, User>(&query).fetch_all(pool).await
    }

    /// List a manager's direct reports, ordered by name.
    pub async fn list_by_manager(pool: &PgPool, manager_id: DbId) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE manager_id = $1 ORDER BY name");
        sqlx::query_as::<_, User>(&query)
            .bind(manager_id)
            .fetch_all(pool)
            .await
    }

    /// Whether the user has at least one direct report.
    pub async fn has_reportees(pool: &PgPool, manager_id: DbId) -> Result<bool, sqlx::Error> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM users WHERE manager_id = $1")
                .bind(manager_id)
                .fetch_one(pool)
                .await?;
        Ok(count.0 > 0)
    }

    /// Update a user. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                title = COALESCE($4, title),
                level = COALESCE($5, level),
                manager_id = COALESCE($6, manager_id),
                admin = COALESCE($7, admin)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.title)
            .bind(input.level)
            .bind(input.manager_id)
            .bind(input.admin)
            .fetch_optional(pool)
            .await
    }

    /// Delete a user. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Find a user by the SHA-256 hash of their verification token.
    pub async fn find_by_verification_token(
        pool: &PgPool,
        token_hash: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE verification_token_hash = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(token_hash)
            .fetch_optional(pool)
            .await
    }

    /// Mark a user's email verified and clear the verification token.
    pub async fn verify_email(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE users SET email_verified = TRUE, verification_token_hash = NULL WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Store a password-reset token hash with its expiry.
    pub async fn set_reset_token(
        pool: &PgPool,
        id: DbId,
        token_hash: &str,
        expires: Timestamp,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE users SET reset_token_hash = $2, reset_token_expires = $3 WHERE id = $1",
        )
        .bind(id)
        .bind(token_hash)
        .bind(expires)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Find a user by a still-valid reset token hash.
    pub async fn find_by_reset_token(
        pool: &PgPool,
        token_hash: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users
             WHERE reset_token_hash = $1 AND reset_token_expires > NOW()"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(token_hash)
            .fetch_optional(pool)
            .await
    }

    /// Update a user's password hash and clear any reset token.
    pub async fn update_password(
        pool: &PgPool,
        id: DbId,
        password_hash: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE users SET password_hash = $2, reset_token_hash = NULL,
                reset_token_expires = NULL
             WHERE id = $1",
        )
        .bind(id)
        .bind(password_hash)
        .execute(pool)
        .await?;
        Ok(())
    }
}
