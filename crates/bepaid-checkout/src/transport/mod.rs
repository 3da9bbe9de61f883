//! HTTP Transport
//!
//! The checkout client only knows "send this method, URL, headers and body;
//! get back a status and a body". Anything that can do that implements
//! [`HttpTransport`].

mod http;
mod mock;

pub use http::{DEFAULT_USER_AGENT, ReqwestTransport};
pub use mock::MockTransport;

use async_trait::async_trait;
use reqwest::Method;
use reqwest::header::HeaderMap;

use crate::error::Result;

/// One outgoing request
#[derive(Clone, Debug)]
pub struct TransportRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

/// Status code and raw body of a completed exchange
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Transport trait (Strategy pattern)
///
/// Connection failures must surface as
/// [`CheckoutError::Transport`](crate::CheckoutError::Transport). Any HTTP
/// status, including 4xx/5xx, is a successful exchange.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse>;
}

#[async_trait]
impl<T: HttpTransport + ?Sized> HttpTransport for std::sync::Arc<T> {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
        (**self).send(request).await
    }
}
