pub mod approval;
pub mod auth;
pub mod objective;
pub mod share;
pub mod strategic_priority;
pub mod team;
pub mod user;
