//! Transport seam between the controllers and the network.
//!
//! Controllers only see the `Transport` trait: one request in, exactly
//! one `(status, body)` result out, unless the owning task is aborted
//! first. The production implementation wraps a `reqwest::Client`;
//! tests substitute scripted implementations.

mod flight;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, Url};

use crate::config::Config;
use crate::error::FetchError;

pub use flight::{Flight, FlightId};

/// Raw transport response: status code plus body bytes.
///
/// Deliberately untyped; classification happens in the decode layer so
/// non-2xx bodies are never parsed as the expected shape.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: Bytes,
}

pub type TransportFuture =
    Pin<Box<dyn Future<Output = Result<RawResponse, FetchError>> + Send + 'static>>;

/// One-shot request issuer.
///
/// Transport-level failures (connect, read) arrive pre-classified as
/// `FetchError::Unexpected`; HTTP error statuses are NOT failures at
/// this layer and come back as a normal `RawResponse`.
pub trait Transport: Send + Sync + 'static {
    fn issue(&self, url: Url) -> TransportFuture;
}

/// reqwest-backed production transport.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Build a client from config: timeouts plus the headers GitHub
    /// requires (`User-Agent` is mandatory for api.github.com).
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        if let Ok(agent) = HeaderValue::from_str(&config.user_agent) {
            headers.insert(USER_AGENT, agent);
        }

        let client = Client::builder()
            .default_headers(headers)
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(FetchError::unexpected)?;

        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn issue(&self, url: Url) -> TransportFuture {
        let client = self.client.clone();
        Box::pin(async move {
            let response = client
                .get(url)
                .send()
                .await
                .map_err(FetchError::unexpected)?;
            let status = response.status().as_u16();
            let body = response.bytes().await.map_err(FetchError::unexpected)?;
            Ok(RawResponse { status, body })
        })
    }
}

/// Convenience alias used wherever a transport is shared with spawned
/// completion tasks.
pub type SharedTransport = Arc<dyn Transport>;
