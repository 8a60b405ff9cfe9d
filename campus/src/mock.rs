//! Scripted transport for unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::http::{ApiRequest, ApiResponse, Transport, TransportError};

#[derive(Default)]
struct Script {
    replies: VecDeque<Result<ApiResponse, TransportError>>,
    sent: Vec<ApiRequest>,
}

/// Replays queued replies in order and records every request it receives.
#[derive(Clone, Default)]
pub(crate) struct MockTransport {
    script: Arc<Mutex<Script>>,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reply(&self, status: u16, body: Value) -> &Self {
        self.script.lock().unwrap().replies.push_back(Ok(ApiResponse { status, body: body.to_string() }));
        self
    }

    pub(crate) fn reply_raw(&self, status: u16, body: &str) -> &Self {
        self.script.lock().unwrap().replies.push_back(Ok(ApiResponse { status, body: body.to_owned() }));
        self
    }

    pub(crate) fn fail(&self, message: &str) -> &Self {
        self.script.lock().unwrap().replies.push_back(Err(TransportError(message.to_owned())));
        self
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.script.lock().unwrap().sent.clone()
    }
}

impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let mut script = self.script.lock().unwrap();
        script.sent.push(request);
        script
            .replies
            .pop_front()
            .unwrap_or_else(|| Err(TransportError("no scripted reply".to_owned())))
    }
}
