//! Payload fetcher trait and its HTTP implementation
//!
//! The fetcher performs exactly one GET per call and hands back the raw
//! body. It never retries; callers decide whether to try again.

use crate::error::{CurrencyError, Result};
use crate::types::RawPayload;
use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::header::ACCEPT_ENCODING;
use reqwest::Client;
use std::error::Error as StdError;
use std::io;
use std::time::Duration;
use tracing::debug;

/// Bound for the TCP connect plus TLS handshake
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Bound for the whole request, body included. Generous because the
/// upstream CDN is sometimes slow to serve the asset.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 300;

/// Idle keep-alive for pooled connections; this is a one-shot client
pub const DEFAULT_POOL_IDLE_TIMEOUT_SECS: u64 = 5;

pub const DEFAULT_USER_AGENT: &str = "CurrencyRates/1.0";

/// Upper bound on the body buffer pre-allocated from Content-Length
const MAX_PREALLOC_BYTES: u64 = 1 << 20;

/// Transport settings for [`HttpFetcher`]
#[derive(Debug, Clone)]
pub struct TransportPolicy {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub pool_idle_timeout: Duration,
    /// SECURITY: when true, self-signed, expired and hostname-mismatched
    /// certificates are all accepted. On in the default policy because the
    /// rates asset is public, low-sensitivity data. Use
    /// [`TransportPolicy::strict`] anywhere transport trust matters.
    pub danger_accept_invalid_certs: bool,
    pub user_agent: String,
}

impl TransportPolicy {
    /// Default policy with certificate verification turned back on
    pub fn strict() -> Self {
        Self {
            danger_accept_invalid_certs: false,
            ..Self::default()
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

impl Default for TransportPolicy {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            pool_idle_timeout: Duration::from_secs(DEFAULT_POOL_IDLE_TIMEOUT_SECS),
            danger_accept_invalid_certs: true,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Source of raw rate payloads
#[async_trait]
pub trait PayloadFetcher: Send + Sync {
    /// Fetch the full body at `url`
    async fn fetch(&self, url: &str) -> Result<RawPayload>;
}

/// reqwest-backed fetcher
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a fetcher from a transport policy
    pub fn new(policy: &TransportPolicy) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(policy.connect_timeout)
            .timeout(policy.request_timeout)
            .pool_idle_timeout(policy.pool_idle_timeout)
            .danger_accept_invalid_certs(policy.danger_accept_invalid_certs)
            .danger_accept_invalid_hostnames(policy.danger_accept_invalid_certs)
            .user_agent(policy.user_agent.as_str())
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PayloadFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<RawPayload> {
        debug!("Fetching currency payload from {}", url);

        // Ask for an uncompressed body
        let response = self
            .client
            .get(url)
            .header(ACCEPT_ENCODING, "identity")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CurrencyError::UpstreamStatus {
                status,
                url: url.to_string(),
            });
        }

        let capacity = response
            .content_length()
            .unwrap_or(0)
            .min(MAX_PREALLOC_BYTES) as usize;
        let mut body = Vec::with_capacity(capacity);
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            match chunk {
                Ok(chunk) => body.extend_from_slice(&chunk),
                Err(e) if is_unexpected_eof(&e) => {
                    if body.is_empty() {
                        return Err(CurrencyError::EmptyBody {
                            url: url.to_string(),
                        });
                    }
                    debug!(
                        "Body from {} ended early after {} bytes, keeping partial payload",
                        url,
                        body.len()
                    );
                    break;
                }
                Err(e) => return Err(e.into()),
            }
        }

        debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(body)
    }
}

/// True when the error chain bottoms out in an `UnexpectedEof` io error,
/// which is how a body cut short of its declared length surfaces.
fn is_unexpected_eof(err: &reqwest::Error) -> bool {
    let mut source = Some(err as &(dyn StdError + 'static));
    while let Some(e) = source {
        if let Some(io_err) = e.downcast_ref::<io::Error>() {
            if io_err.kind() == io::ErrorKind::UnexpectedEof {
                return true;
            }
        }
        source = e.source();
    }
    false
}
