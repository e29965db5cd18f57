//! Share ledger models: events, recipients, and the joined rows the
//! incoming/outgoing share views read.

use bigrocks_core::grouping::GroupItem;
use bigrocks_core::objective::ObjectiveKind;
use bigrocks_core::share::Acceptance;
use bigrocks_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `share_events` table: one fan-out action by one
/// sender for one objective. Immutable once created.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ShareEvent {
    pub id: DbId,
    pub objective_id: DbId,
    pub from_user_id: DbId,
    pub created_at: Timestamp,
}

/// A row from the `share_recipients` table: one offer to one recipient.
///
/// `objective_id` and `from_user_id` duplicate the owning event so the
/// `uq_share_recipients_offer` constraint can arbitrate duplicate
/// offers in one table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ShareRecipient {
    pub id: DbId,
    pub share_event_id: DbId,
    pub objective_id: DbId,
    pub from_user_id: DbId,
    pub to_user_id: DbId,
    pub accepted: String,
    pub created_at: Timestamp,
}

impl ShareRecipient {
    /// The typed acceptance state. The `ck_share_recipients_accepted`
    /// check keeps the column within the known set.
    pub fn acceptance(&self) -> Acceptance {
        Acceptance::parse(&self.accepted).unwrap_or(Acceptance::Pending)
    }
}

/// A share event joined with its subject objective, plus the parent
/// objective's strategic priority (needed by the adoption
/// priority-inheritance rule when promoting an RCI to a Big Rock).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ShareEventWithObjective {
    pub id: DbId,
    pub objective_id: DbId,
    pub from_user_id: DbId,
    pub objective_name: String,
    pub objective_kind: String,
    pub objective_description: Option<String>,
    pub objective_metric: Option<String>,
    pub objective_strategic_priority_id: Option<DbId>,
    pub parent_strategic_priority_id: Option<DbId>,
}

/// One incoming offer with enough joined context to render it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct IncomingShare {
    pub recipient_id: DbId,
    pub share_event_id: DbId,
    pub accepted: String,
    pub objective_id: DbId,
    pub objective_name: String,
    pub objective_kind: String,
    pub objective_description: Option<String>,
    pub objective_metric: Option<String>,
    pub objective_parent_id: Option<DbId>,
    pub parent_objective_name: Option<String>,
    pub strategic_priority_name: Option<String>,
    pub from_user_id: DbId,
    pub from_user_name: String,
    pub from_user_title: Option<String>,
    pub shared_at: Timestamp,
}

// The incoming-share views group by the subject objective, so the node
// identity is the objective id, not the recipient row id.
impl GroupItem for IncomingShare {
    fn kind(&self) -> ObjectiveKind {
        ObjectiveKind::parse(&self.objective_kind).unwrap_or(ObjectiveKind::BigRock)
    }
    fn node_id(&self) -> DbId {
        self.objective_id
    }
    fn parent_id(&self) -> Option<DbId> {
        self.objective_parent_id
    }
}

/// One outgoing offer made by a sender, with recipient display fields.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OutgoingShare {
    pub objective_id: DbId,
    pub to_user_id: DbId,
    pub to_user_name: String,
    pub to_user_title: Option<String>,
    pub accepted: String,
    pub shared_at: Timestamp,
}
