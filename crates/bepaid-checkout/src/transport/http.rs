//! reqwest-backed transport

use async_trait::async_trait;
use reqwest::Client;

use super::{HttpTransport, TransportRequest, TransportResponse};
use crate::error::Result;

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 6.1; Win64; x64; rv:109.0) Gecko/20100101 Firefox/115.0";

/// Transport over a pooled `reqwest::Client`
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Build a client with the default User-Agent
    pub fn new() -> Result<Self> {
        let client = Client::builder().user_agent(DEFAULT_USER_AGENT).build()?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
        let mut builder = self
            .client
            .request(request.method, &request.url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        // The response owns the pooled connection; it is returned to the pool
        // or closed when dropped, on success and on `?` alike.
        let response = builder.send().await?;
        let status = response.status().as_u16();

        // Once a status line arrived the exchange counts as completed. A body
        // that cannot be read decodes to the invalid-JSON sentinel upstream.
        let body = match response.bytes().await {
            Ok(body) => body.to_vec(),
            Err(e) => {
                tracing::warn!(status, error = %e, "Failed to read checkout API response body");
                Vec::new()
            }
        };

        Ok(TransportResponse { status, body })
    }
}
