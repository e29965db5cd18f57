//! Repository for the share ledger (`share_events` + `share_recipients`).

use bigrocks_core::share::Acceptance;
use bigrocks_core::types::DbId;
use sqlx::PgPool;

use crate::models::share::{
    IncomingShare, OutgoingShare, ShareEvent, ShareEventWithObjective, ShareRecipient,
};

/// Column list for share_events queries.
const EVENT_COLUMNS: &str = "id, objective_id, from_user_id, created_at";

/// Column list for share_recipients queries.
const RECIPIENT_COLUMNS: &str =
    "id, share_event_id, objective_id, from_user_id, to_user_id, accepted, created_at";

/// Joined select shared by the incoming-share queries.
const INCOMING_SELECT: &str = "SELECT
        sr.id AS recipient_id,
        sr.share_event_id,
        sr.accepted,
        se.objective_id,
        o.name AS objective_name,
        o.type AS objective_kind,
        o.description AS objective_description,
        o.metric AS objective_metric,
        o.parent_id AS objective_parent_id,
        parent.name AS parent_objective_name,
        sp.name AS strategic_priority_name,
        se.from_user_id,
        u.name AS from_user_name,
        u.title AS from_user_title,
        se.created_at AS shared_at
     FROM share_recipients sr
     JOIN share_events se ON sr.share_event_id = se.id
     JOIN objectives o ON se.objective_id = o.id
     JOIN users u ON se.from_user_id = u.id
     LEFT JOIN strategic_priorities sp ON o.strategic_priority_id = sp.id
     LEFT JOIN objectives parent ON o.parent_id = parent.id";

/// Provides ledger operations for share events and recipients.
pub struct ShareRepo;

impl ShareRepo {
    /// Record one fan-out: a share event plus one recipient row per
    /// target, atomically.
    ///
    /// Recipient inserts use `ON CONFLICT ... DO NOTHING` against
    /// `uq_share_recipients_offer`, so a concurrent duplicate offer to
    /// the same (objective, sender, recipient) is silently skipped. If
    /// every recipient was already covered the whole transaction rolls
    /// back (no orphan event) and `None` is returned.
    pub async fn create_event_with_recipients(
        pool: &PgPool,
        objective_id: DbId,
        from_user_id: DbId,
        recipient_ids: &[DbId],
    ) -> Result<Option<(ShareEvent, Vec<ShareRecipient>)>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let event_query = format!(
            "INSERT INTO share_events (objective_id, from_user_id)
             VALUES ($1, $2)
             RETURNING {EVENT_COLUMNS}"
        );
        let event = sqlx::query_as::<_, ShareEvent>(&event_query)
            .bind(objective_id)
            .bind(from_user_id)
            .fetch_one(&mut *tx)
            .await?;

        let recipient_query = format!(
            "INSERT INTO share_recipients
                (share_event_id, objective_id, from_user_id, to_user_id)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT ON CONSTRAINT uq_share_recipients_offer DO NOTHING
             RETURNING {RECIPIENT_COLUMNS}"
        );

        let mut recipients = Vec::with_capacity(recipient_ids.len());
        for to_user_id in recipient_ids {
            let inserted = sqlx::query_as::<_, ShareRecipient>(&recipient_query)
                .bind(event.id)
                .bind(objective_id)
                .bind(from_user_id)
                .bind(to_user_id)
                .fetch_optional(&mut *tx)
                .await?;
            if let Some(recipient) = inserted {
                recipients.push(recipient);
            }
        }

        if recipients.is_empty() {
            tx.rollback().await?;
            return Ok(None);
        }

        tx.commit().await?;
        Ok(Some((event, recipients)))
    }

    /// Distinct recipients ever offered this objective by this sender,
    /// across all of the sender's share events. Backs both fan-out
    /// idempotency and the edit/delete lock check.
    pub async fn recipients_already_offered(
        pool: &PgPool,
        objective_id: DbId,
        from_user_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "SELECT DISTINCT to_user_id FROM share_recipients
             WHERE objective_id = $1 AND from_user_id = $2",
        )
        .bind(objective_id)
        .bind(from_user_id)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|r| r.0).collect())
    }

    /// Find a recipient row by its ID.
    pub async fn find_recipient(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ShareRecipient>, sqlx::Error> {
        let query = format!("SELECT {RECIPIENT_COLUMNS} FROM share_recipients WHERE id = $1");
        sqlx::query_as::<_, ShareRecipient>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Move a recipient out of `pending` into a terminal acceptance
    /// state. Re-asserting the current terminal state is a no-op that
    /// still reports success; flipping between terminal states does not
    /// match and returns `false`.
    pub async fn set_acceptance(
        pool: &PgPool,
        recipient_id: DbId,
        acceptance: Acceptance,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE share_recipients SET accepted = $2
             WHERE id = $1 AND accepted IN ('pending', $2)",
        )
        .bind(recipient_id)
        .bind(acceptance.as_str())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// A share event joined with its subject objective and the parent
    /// objective's strategic priority (for adoption inheritance).
    pub async fn find_event_with_objective(
        pool: &PgPool,
        share_event_id: DbId,
    ) -> Result<Option<ShareEventWithObjective>, sqlx::Error> {
        sqlx::query_as::<_, ShareEventWithObjective>(
            "SELECT
                se.id,
                se.objective_id,
                se.from_user_id,
                o.name AS objective_name,
                o.type AS objective_kind,
                o.description AS objective_description,
                o.metric AS objective_metric,
                o.strategic_priority_id AS objective_strategic_priority_id,
                parent.strategic_priority_id AS parent_strategic_priority_id
             FROM share_events se
             JOIN objectives o ON se.objective_id = o.id
             LEFT JOIN objectives parent ON o.parent_id = parent.id
             WHERE se.id = $1",
        )
        .bind(share_event_id)
        .fetch_optional(pool)
        .await
    }

    /// Pending offers addressed to a recipient, excluding the given
    /// senders. The peer view passes the recipient's manager and direct
    /// reports here; their traffic flows through the approval queue and
    /// the cascade view instead.
    pub async fn list_incoming(
        pool: &PgPool,
        to_user_id: DbId,
        exclude_from: &[DbId],
    ) -> Result<Vec<IncomingShare>, sqlx::Error> {
        let query = format!(
            "{INCOMING_SELECT}
             WHERE sr.to_user_id = $1 AND sr.accepted = 'pending'
               AND se.from_user_id <> ALL($2)
             ORDER BY o.type ASC, parent.name NULLS FIRST, o.name"
        );
        sqlx::query_as::<_, IncomingShare>(&query)
            .bind(to_user_id)
            .bind(exclude_from)
            .fetch_all(pool)
            .await
    }

    /// Incoming offers for a recipient from one specific sender
    /// (the cascade-from-manager view).
    pub async fn list_incoming_from(
        pool: &PgPool,
        to_user_id: DbId,
        from_user_id: DbId,
    ) -> Result<Vec<IncomingShare>, sqlx::Error> {
        let query = format!(
            "{INCOMING_SELECT}
             WHERE sr.to_user_id = $1 AND se.from_user_id = $2
             ORDER BY o.type ASC, parent.name NULLS FIRST, o.name"
        );
        sqlx::query_as::<_, IncomingShare>(&query)
            .bind(to_user_id)
            .bind(from_user_id)
            .fetch_all(pool)
            .await
    }

    /// All offers a sender has made, newest event first.
    pub async fn list_outgoing(
        pool: &PgPool,
        from_user_id: DbId,
    ) -> Result<Vec<OutgoingShare>, sqlx::Error> {
        sqlx::query_as::<_, OutgoingShare>(
            "SELECT
                se.objective_id,
                sr.to_user_id,
                u.name AS to_user_name,
                u.title AS to_user_title,
                sr.accepted,
                se.created_at AS shared_at
             FROM share_recipients sr
             JOIN share_events se ON sr.share_event_id = se.id
             JOIN users u ON sr.to_user_id = u.id
             WHERE se.from_user_id = $1
             ORDER BY se.created_at DESC",
        )
        .bind(from_user_id)
        .fetch_all(pool)
        .await
    }
}
