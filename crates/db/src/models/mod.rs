//! Row structs and DTOs, one module per table plus joined view rows.

pub mod objective;
pub mod share;
pub mod strategic_priority;
pub mod user;
