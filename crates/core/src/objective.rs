//! Objective taxonomy and approval policy.
//!
//! Defines the two objective kinds ("Big Rock" top-level commitments and
//! "RCI" dependent initiatives) and the level-based approval thresholds
//! used at creation, adoption, and manager approval.

use serde::{Deserialize, Serialize};

/// The two kinds of objective in the hierarchy.
///
/// A Big Rock is a top-level commitment; an RCI (risk-critical
/// initiative) is a dependent initiative, optionally parented to a Big
/// Rock. Parenting conventions are not enforced at this level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectiveKind {
    BigRock,
    RiskCriticalInitiative,
}

impl ObjectiveKind {
    /// Database / wire representation of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectiveKind::BigRock => "big_rock",
            ObjectiveKind::RiskCriticalInitiative => "risk_critical_initiative",
        }
    }

    /// Parse the database representation. Returns `None` for anything else.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "big_rock" => Some(ObjectiveKind::BigRock),
            "risk_critical_initiative" => Some(ObjectiveKind::RiskCriticalInitiative),
            _ => None,
        }
    }
}

/// Highest hierarchy level whose objectives are approved at creation and
/// at adoption, without going through a manager.
pub const AUTO_APPROVE_MAX_LEVEL: i32 = 2;

/// Lowest hierarchy level that must request approval from a manager.
pub const APPROVAL_REQUIRED_MIN_LEVEL: i32 = 3;

/// Whether a user at the given level self-approves new and adopted
/// objectives. Level 1 is the top of the hierarchy.
pub fn auto_approved(level: i32) -> bool {
    level <= AUTO_APPROVE_MAX_LEVEL
}

/// Whether a user at the given level must request approval up the chain.
pub fn requires_approval(level: i32) -> bool {
    level >= APPROVAL_REQUIRED_MIN_LEVEL
}

/// Validate a kind string from a request payload.
pub fn validate_kind(value: &str) -> Result<ObjectiveKind, String> {
    ObjectiveKind::parse(value).ok_or_else(|| {
        format!("Invalid objective type '{value}'. Must be 'big_rock' or 'risk_critical_initiative'")
    })
}
