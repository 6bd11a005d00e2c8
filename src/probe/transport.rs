//! HTTP transport used by the availability prober.
//!
//! The prober only ever needs the numeric status code of a GET request with
//! redirects followed, so the transport boundary is a single method. This keeps
//! the retry and caching logic testable against an in-memory fake.

use crate::constants::USER_AGENT;
use crate::core::LinksError;
use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;
use tracing::trace;

/// Maximum number of redirects followed for one probe.
const MAX_REDIRECTS: usize = 10;

/// Issues probe requests and reports their final status code.
#[async_trait]
pub trait ProbeTransport: Send + Sync {
    /// Performs a GET request against `url`, following redirects.
    ///
    /// Returns the status code of the final response, or an error when no
    /// response was received at all (DNS, TLS, timeout, ...).
    async fn status(&self, url: &str) -> Result<u16>;
}

/// [`ProbeTransport`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Builds a client that follows redirects and aborts requests after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, LinksError> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| LinksError::NetworkError {
                operation: "create HTTP client".to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self {
            client,
        })
    }
}

#[async_trait]
impl ProbeTransport for HttpTransport {
    async fn status(&self, url: &str) -> Result<u16> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        trace!(target: "probe", "GET {} -> {} ({})", url, status, response.url());
        Ok(status)
    }
}
