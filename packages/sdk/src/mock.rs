//! Recording [`Transport`] double for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::error::RemoteError;
use crate::transport::{ApiRequest, RawResponse, Transport};

/// Replays canned responses in order and records every request it sees.
///
/// Running out of canned responses yields a [`RemoteError::Transport`],
/// which doubles as a "nothing should have been sent" tripwire.
#[derive(Debug, Default)]
pub(crate) struct MockTransport {
    responses: Mutex<VecDeque<RawResponse>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(self, status: u16, body: &str) -> Self {
        self.with_response(RawResponse::new(status, body))
    }

    pub(crate) fn with_response(self, response: RawResponse) -> Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    /// Number of requests sent so far.
    pub(crate) fn sent(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub(crate) fn last_request(&self) -> ApiRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

impl Transport for MockTransport {
    fn send(&self, request: &ApiRequest) -> Result<RawResponse, RemoteError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| RemoteError::Transport("no canned response left".into()))
    }
}
