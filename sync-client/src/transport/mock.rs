//! Mock transport for testing.
//!
//! Allows queueing responses per route and capturing sent requests for
//! verification.

use super::{Method, Transport, TransportError};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

/// A request captured by [`MockTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    /// HTTP verb.
    pub method: Method,
    /// Path exactly as passed to `send`.
    pub path: String,
    /// Encoded body, if any.
    pub body: Option<Vec<u8>>,
}

impl RecordedRequest {
    /// Body parsed as JSON, if present and well-formed.
    pub fn json(&self) -> Option<serde_json::Value> {
        self.body
            .as_deref()
            .and_then(|b| serde_json::from_slice(b).ok())
    }
}

type Route = (Method, String);

/// Mock transport for testing.
///
/// Responses are queued per (method, path). Each request pops the next
/// queued response for its route; the last response of a route is kept
/// and replayed for any further request. A request to a route with nothing
/// queued is answered with a 404 rejection.
#[derive(Debug, Default)]
pub struct MockTransport {
    inner: Arc<Mutex<MockTransportInner>>,
}

#[derive(Debug, Default)]
struct MockTransportInner {
    routes: HashMap<Route, VecDeque<Result<Vec<u8>, TransportError>>>,
    requests: Vec<RecordedRequest>,
    fail_next_send: Option<String>,
}

impl MockTransport {
    /// Create a new mock transport.
    pub fn new() -> Self {
        Self::default()
    }

    fn inner(&self) -> MutexGuard<'_, MockTransportInner> {
        // A panicking test must not poison the other clones.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn queue(&self, method: Method, path: &str, response: Result<Vec<u8>, TransportError>) {
        self.inner()
            .routes
            .entry((method, path.to_string()))
            .or_default()
            .push_back(response);
    }

    /// Queue a successful response body for a route.
    pub fn respond(&self, method: Method, path: &str, body: impl Into<Vec<u8>>) {
        self.queue(method, path, Ok(body.into()));
    }

    /// Queue a JSON response body for a route.
    pub fn respond_json(&self, method: Method, path: &str, body: &serde_json::Value) {
        self.respond(method, path, body.to_string());
    }

    /// Queue a non-success status for a route.
    pub fn reject(&self, method: Method, path: &str, status: u16, body: &str) {
        self.queue(
            method,
            path,
            Err(TransportError::Rejected {
                status,
                body: body.to_string(),
            }),
        );
    }

    /// Queue an arbitrary transport error for a route.
    pub fn fail(&self, method: Method, path: &str, error: TransportError) {
        self.queue(method, path, Err(error));
    }

    /// Cause the next send() to fail with a connection error.
    pub fn fail_next_send(&self, error: &str) {
        self.inner().fail_next_send = Some(error.to_string());
    }

    /// Get all requests that were sent, in order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.inner().requests.clone()
    }

    /// Get the last request that was sent.
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.inner().requests.last().cloned()
    }

    /// Requests sent with the given verb.
    pub fn requests_with(&self, method: Method) -> Vec<RecordedRequest> {
        self.inner()
            .requests
            .iter()
            .filter(|r| r.method == method)
            .cloned()
            .collect()
    }
}

impl Clone for MockTransport {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&[u8]>,
    ) -> Result<Vec<u8>, TransportError> {
        let mut inner = self.inner();

        inner.requests.push(RecordedRequest {
            method,
            path: path.to_string(),
            body: body.map(<[u8]>::to_vec),
        });

        // Check for forced failure
        if let Some(error) = inner.fail_next_send.take() {
            return Err(TransportError::Connection(error));
        }

        let queue = inner.routes.get_mut(&(method, path.to_string()));
        match queue {
            Some(queue) if queue.len() > 1 => queue
                .pop_front()
                .unwrap_or_else(|| Err(TransportError::Request("empty route".into()))),
            Some(queue) => queue
                .front()
                .cloned()
                .unwrap_or_else(|| Err(TransportError::Request("empty route".into()))),
            None => Err(TransportError::Rejected {
                status: 404,
                body: format!("no mock response for {} {}", method, path),
            }),
        }
    }
}
