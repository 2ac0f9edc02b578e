//! # sync-client
//!
//! Client library for teamsync team membership reconciliation.
//!
//! This is the library that callers use to read and converge team
//! memberships against the remote team API.
//!
//! ## Features
//!
//! - **Paginated Reads**: every collection is fetched by following `next` links
//! - **Unified Membership View**: members and pending invitations merged per team
//! - **Ordered Apply**: remove, then add, then update; stops at the first failure
//! - **Transport Abstraction**: Pluggable transport layer (reqwest, mock)
//!
//! ## Example
//!
//! ```ignore
//! use teamsync_client::{HttpTransport, HttpTransportConfig, TeamClient, UserMemberships};
//! use teamsync_core::{DesiredUser, TeamAssignment};
//!
//! let transport = HttpTransport::new(HttpTransportConfig::new("api-token"))?;
//! let hooks = UserMemberships::new(TeamClient::new(transport));
//!
//! let desired = DesiredUser::new("dev@example.com", vec![TeamAssignment::new(1, true)]);
//! let report = hooks.converge(&desired).await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod applier;
pub mod client;
pub mod error;
pub mod memberships;
pub mod transport;

pub use applier::{ApplyError, ApplyReport, OperationApplier};
pub use client::TeamClient;
pub use error::ClientError;
pub use memberships::UserMemberships;
pub use transport::{
    is_success_status, HttpTransport, HttpTransportConfig, Method, MockTransport,
    RecordedRequest, Transport, TransportError, DEFAULT_HOST,
};
