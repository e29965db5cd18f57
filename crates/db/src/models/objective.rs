//! Objective models, including the joined rows the hierarchy views read.

use bigrocks_core::grouping::GroupItem;
use bigrocks_core::objective::ObjectiveKind;
use bigrocks_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `objectives` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Objective {
    pub id: DbId,
    pub name: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
    pub description: Option<String>,
    pub metric: Option<String>,
    pub strategic_priority_id: Option<DbId>,
    pub parent_id: Option<DbId>,
    pub owner_user_id: DbId,
    /// Set when the objective was created by adopting a share; records
    /// who it came from.
    pub received_from_user_id: Option<DbId>,
    pub approved: bool,
    pub rejected: bool,
    pub comments: Option<String>,
    pub created_at: Timestamp,
}

impl Objective {
    /// The typed kind. The `ck_objectives_type` check keeps the column
    /// within the known set.
    pub fn objective_kind(&self) -> ObjectiveKind {
        ObjectiveKind::parse(&self.kind).unwrap_or(ObjectiveKind::BigRock)
    }
}

/// DTO for inserting a new objective.
#[derive(Debug, Clone)]
pub struct CreateObjective {
    pub name: String,
    pub kind: ObjectiveKind,
    pub description: Option<String>,
    pub metric: Option<String>,
    pub strategic_priority_id: Option<DbId>,
    pub parent_id: Option<DbId>,
    pub owner_user_id: DbId,
    pub received_from_user_id: Option<DbId>,
    pub approved: bool,
}

/// DTO for partial objective updates. Only non-`None` fields are applied;
/// parent reassignment (which must be able to write NULL) goes through
/// `ObjectiveRepo::set_parent` instead.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateObjective {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub description: Option<String>,
    pub metric: Option<String>,
    pub strategic_priority_id: Option<DbId>,
}

/// An owned objective joined with provenance and display names.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ObjectiveWithDetails {
    pub id: DbId,
    pub name: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
    pub description: Option<String>,
    pub metric: Option<String>,
    pub strategic_priority_id: Option<DbId>,
    pub strategic_priority_name: Option<String>,
    pub parent_id: Option<DbId>,
    pub parent_name: Option<String>,
    pub owner_user_id: DbId,
    pub received_from_user_id: Option<DbId>,
    pub received_from_name: Option<String>,
    pub received_from_title: Option<String>,
    pub approved: bool,
    pub rejected: bool,
    pub comments: Option<String>,
    pub created_at: Timestamp,
}

impl GroupItem for ObjectiveWithDetails {
    fn kind(&self) -> ObjectiveKind {
        ObjectiveKind::parse(&self.kind).unwrap_or(ObjectiveKind::BigRock)
    }
    fn node_id(&self) -> DbId {
        self.id
    }
    fn parent_id(&self) -> Option<DbId> {
        self.parent_id
    }
}

/// A direct report's unapproved objective awaiting the manager's decision.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PendingApproval {
    pub id: DbId,
    pub name: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
    pub description: Option<String>,
    pub metric: Option<String>,
    pub strategic_priority_id: Option<DbId>,
    pub strategic_priority_name: Option<String>,
    pub parent_id: Option<DbId>,
    pub parent_name: Option<String>,
    pub owner_user_id: DbId,
    pub owner_name: String,
    pub owner_title: Option<String>,
    pub approved: bool,
    pub rejected: bool,
    pub comments: Option<String>,
    pub created_at: Timestamp,
}

impl GroupItem for PendingApproval {
    fn kind(&self) -> ObjectiveKind {
        ObjectiveKind::parse(&self.kind).unwrap_or(ObjectiveKind::BigRock)
    }
    fn node_id(&self) -> DbId {
        self.id
    }
    fn parent_id(&self) -> Option<DbId> {
        self.parent_id
    }
}

/// One row of a manager's transitive team rollup.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TeamObjective {
    pub id: DbId,
    pub name: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
    pub description: Option<String>,
    pub metric: Option<String>,
    pub strategic_priority_id: Option<DbId>,
    pub strategic_priority_name: Option<String>,
    pub parent_id: Option<DbId>,
    pub parent_name: Option<String>,
    pub approved: bool,
    pub owner_user_id: DbId,
    pub owner_name: String,
    pub owner_title: Option<String>,
    pub owner_level: i32,
    pub created_at: Timestamp,
}

impl GroupItem for TeamObjective {
    fn kind(&self) -> ObjectiveKind {
        ObjectiveKind::parse(&self.kind).unwrap_or(ObjectiveKind::BigRock)
    }
    fn node_id(&self) -> DbId {
        self.id
    }
    fn parent_id(&self) -> Option<DbId> {
        self.parent_id
    }
}
