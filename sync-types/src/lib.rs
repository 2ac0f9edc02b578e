//! # sync-types
//!
//! Wire records for the team membership REST API.
//!
//! This crate provides the foundational types used across all teamsync crates:
//! - [`TeamId`], [`MemberId`], [`InvitationId`], [`ProjectId`] - Identity types
//! - [`Team`], [`Member`], [`Invitation`], [`Project`] - Records as the API returns them
//! - [`Page`] - Collection envelope with cursor links
//! - [`requests`] - Request bodies for mutating calls
//! - [`WireError`] - Codec errors

#![warn(missing_docs)]
#![warn(clippy::all)]

mod envelope;
mod error;
mod ids;
mod records;
pub mod requests;

pub use envelope::{Links, Page};
pub use error::{decode, encode, WireError};
pub use ids::{InvitationId, MemberId, ProjectId, TeamId};
pub use records::{Invitation, Member, Owner, Project, ProjectSummary, Team};
