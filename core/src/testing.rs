//! Recording transport for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::http::{HttpRequest, HttpResponse, Transport, TransportError};

/// Replays queued responses in order and records every request it receives.
/// With nothing queued, `send` fails like a dropped connection.
#[derive(Debug, Default)]
pub(crate) struct MockTransport {
    responses: Mutex<VecDeque<HttpResponse>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(&self, status: u16, body: serde_json::Value) {
        self.push(status, body.to_string());
    }

    pub(crate) fn respond_no_content(&self) {
        self.push(204, String::new());
    }

    fn push(&self, status: u16, body: String) {
        self.responses.lock().unwrap().push_back(HttpResponse {
            status,
            headers: Vec::new(),
            body,
        });
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn last_request(&self) -> HttpRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }

    /// The last request's body parsed as JSON.
    pub(crate) fn last_body(&self) -> Option<serde_json::Value> {
        self.last_request()
            .body
            .map(|body| serde_json::from_str(&body).unwrap())
    }
}

impl Transport for MockTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses.lock().unwrap().pop_front().ok_or_else(|| {
            TransportError::new(std::io::Error::new(
                std::io::ErrorKind::ConnectionReset,
                "no response queued",
            ))
        })
    }
}
