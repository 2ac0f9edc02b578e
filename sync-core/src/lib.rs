//! # sync-core
//!
//! Pure logic for teamsync (no I/O, instant tests).
//!
//! This crate implements the reconciliation algorithms for team membership
//! without any network I/O, enabling fast unit tests.
//!
//! ## Design Philosophy
//!
//! All modules in this crate are **pure** - they take input and produce output
//! without side effects:
//! - [`diff`] turns an old and a new declared state into operations
//! - [`view`] merges members and pending invitations into one membership view
//! - [`pagination`] tracks the page-following loop and its termination
//!
//! The actual I/O (HTTP calls) is performed by `sync-client`, which
//! executes the operations produced here.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod desired;
pub mod diff;
pub mod pagination;
pub mod view;

pub use desired::{DesiredUser, DuplicateTeam, TeamAssignment};
pub use diff::{plan, MembershipDiff, Operation};
pub use pagination::{PageCursor, PaginationError, DEFAULT_MAX_PAGES};
pub use view::{MembershipRecord, MembershipRef, MembershipView};
