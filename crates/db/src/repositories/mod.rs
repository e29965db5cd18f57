//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod objective_repo;
pub mod share_repo;
pub mod strategic_priority_repo;
pub mod user_repo;

pub use objective_repo::ObjectiveRepo;
pub use share_repo::ShareRepo;
pub use strategic_priority_repo::StrategicPriorityRepo;
pub use user_repo::UserRepo;
