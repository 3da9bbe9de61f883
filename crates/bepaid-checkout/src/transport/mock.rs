//! Mock Transport
//!
//! For testing and offline demos. Replays one canned outcome for every
//! request and records what it was sent.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use super::{HttpTransport, TransportRequest, TransportResponse};
use crate::error::{CheckoutError, Result};

#[derive(Clone, Debug)]
enum Reply {
    Respond(TransportResponse),
    Fail(String),
    Hang,
}

/// Canned transport
#[derive(Debug)]
pub struct MockTransport {
    reply: Reply,
    requests: Mutex<Vec<TransportRequest>>,
}

impl MockTransport {
    fn with_reply(reply: Reply) -> Self {
        Self {
            reply,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Answer every request with `status` and a raw `body`
    pub fn respond(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self::with_reply(Reply::Respond(TransportResponse {
            status,
            body: body.into(),
        }))
    }

    /// Answer every request with `status` and a JSON body
    pub fn json(status: u16, body: &serde_json::Value) -> Self {
        Self::respond(status, body.to_string())
    }

    /// Fail every request as if the connection was refused
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_reply(Reply::Fail(message.into()))
    }

    /// Never complete; for cancellation tests
    pub fn hanging() -> Self {
        Self::with_reply(Reply::Hang)
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<TransportRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);

        match &self.reply {
            Reply::Respond(response) => Ok(response.clone()),
            Reply::Fail(message) => Err(CheckoutError::Transport(message.clone())),
            Reply::Hang => std::future::pending().await,
        }
    }
}
