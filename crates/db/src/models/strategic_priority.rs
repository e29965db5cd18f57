//! Strategic priority taxonomy models.

use bigrocks_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `strategic_priorities` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StrategicPriority {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for creating a strategic priority.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStrategicPriority {
    pub name: String,
    pub description: Option<String>,
}

/// DTO for partial strategic priority updates.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateStrategicPriority {
    pub name: Option<String>,
    pub description: Option<String>,
}
