//! CLI command implementations.

pub mod diff;
pub mod projects;
pub mod teams;
pub mod user;
pub mod users;
