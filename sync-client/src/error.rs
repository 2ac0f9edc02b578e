//! Client error taxonomy.

use teamsync_core::PaginationError;
use teamsync_types::WireError;
use thiserror::Error;

use crate::applier::ApplyError;
use crate::transport::TransportError;

/// Client errors.
///
/// Nothing here is retried internally; every variant is returned to the
/// immediate caller as-is.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network failure or timeout.
    #[error("transport error: {0}")]
    Transport(#[source] TransportError),

    /// The API answered with a non-success status.
    #[error("status: {status}, body: {body}")]
    Remote {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// A payload could not be encoded or decoded.
    #[error("decode error: {0}")]
    Decode(#[from] WireError),

    /// The requested record is absent from a successfully fetched listing.
    #[error("{kind} not found: {key}")]
    NotFound {
        /// Kind of record ("team", "project", "membership", ...).
        kind: &'static str,
        /// What was looked up.
        key: String,
    },

    /// A page-following loop was aborted.
    #[error("pagination error: {0}")]
    Pagination(#[from] PaginationError),

    /// An operation batch stopped part way.
    #[error("partial apply: {0}")]
    PartialApply(Box<ApplyError>),
}

impl ClientError {
    /// Shorthand for a [`ClientError::NotFound`].
    pub fn not_found(kind: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            kind,
            key: key.to_string(),
        }
    }

    /// True for a logical absence rather than a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<TransportError> for ClientError {
    fn from(error: TransportError) -> Self {
        match error {
            TransportError::Rejected { status, body } => Self::Remote { status, body },
            other => Self::Transport(other),
        }
    }
}

impl From<ApplyError> for ClientError {
    fn from(error: ApplyError) -> Self {
        Self::PartialApply(Box::new(error))
    }
}
