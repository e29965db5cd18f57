//! Domain core for the objective cascade workflow.
//!
//! Pure types and rules shared by the db and api layers: the objective
//! taxonomy and approval policy, the tri-state share acceptance state
//! machine, the error taxonomy, and the parent/child grouping projection
//! used by every hierarchy view. No I/O lives here.

pub mod error;
pub mod grouping;
pub mod objective;
pub mod share;
pub mod types;
