//! Default transport adapter built on reqwest.

use async_trait::async_trait;
use reqwest::redirect::Policy;
use std::time::Duration;

use super::{Method, Request, Transport, TransportError};
use crate::core::Result;

/// Default connection timeout in seconds
const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
/// Maximum redirects followed before the transport gives up
const MAX_REDIRECTS: usize = 10;

/// Transport backed by a shared [`reqwest::Client`].
///
/// Registered under the `"reqwest"` identifier and used when the options
/// name no adapter.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECONDS))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(Policy::limited(MAX_REDIRECTS))
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &Request) -> std::result::Result<u16, TransportError> {
        let builder = match request.method() {
            Method::Get => self.client.get(request.url()),
            Method::Head => self.client.head(request.url()),
        };

        match builder.send().await {
            Ok(response) => Ok(response.status().as_u16()),
            Err(err) => {
                // Prefer the underlying cause; reqwest's top-level message
                // mostly repeats the URL
                let description = std::error::Error::source(&err)
                    .map(|e| e.to_string())
                    .unwrap_or_else(|| err.to_string());
                Err(TransportError::new(description))
            }
        }
    }
}
