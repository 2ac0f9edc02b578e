//! Transport abstraction for teamsync.
//!
//! This module provides a pluggable transport layer that abstracts
//! the underlying HTTP mechanism (reqwest, mock for testing).
//!
//! # Design
//!
//! The transport trait is a single request/response call:
//! - `send()` issues one request and returns the raw response body
//! - Non-success statuses come back as [`TransportError::Rejected`]
//!   carrying the status and the raw body
//!
//! Calls are awaited one at a time by the client; a transport never
//! retries on its own.
//!
//! # Example
//!
//! ```ignore
//! let transport = MockTransport::new();
//! transport.respond(Method::Get, "/v2/teams", br#"{"results": []}"#.to_vec());
//! let body = transport.send(Method::Get, "/v2/teams", None).await?;
//! ```

mod http;
mod mock;

pub use http::{is_success_status, HttpTransport, HttpTransportConfig, DEFAULT_HOST};
pub use mock::{MockTransport, RecordedRequest};

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// HTTP verbs used by the team API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Read a resource or a page of a collection.
    Get,
    /// Create a resource.
    Post,
    /// Update a resource.
    Put,
    /// Delete a resource.
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        };
        f.write_str(verb)
    }
}

/// Transport errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Connection failed.
    #[error("connection failed: {0}")]
    Connection(String),

    /// Request timed out.
    #[error("request timeout")]
    Timeout,

    /// The server answered with a status outside the accepted set.
    #[error("status: {status}, body: {body}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// The request could not be built or the response could not be read.
    #[error("request failed: {0}")]
    Request(String),
}

/// Transport trait for issuing team API requests.
///
/// Implementations handle the underlying connection mechanism
/// (reqwest over HTTPS, mock, etc).
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request and return the response body.
    ///
    /// `path` is either relative to the configured host or an absolute URL
    /// taken from a pagination link. `body` is an already encoded JSON
    /// payload.
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&[u8]>,
    ) -> Result<Vec<u8>, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_display() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Post.to_string(), "POST");
        assert_eq!(Method::Put.to_string(), "PUT");
        assert_eq!(Method::Delete.to_string(), "DELETE");
    }

    #[test]
    fn rejected_display_carries_status_and_body() {
        let err = TransportError::Rejected {
            status: 422,
            body: "{\"errors\":\"bad\"}".to_string(),
        };
        assert_eq!(err.to_string(), "status: 422, body: {\"errors\":\"bad\"}");
    }
}
