//! The low-level HTTP engine behind [`HttpClient`](super::HttpClient).

use super::resource::HttpMethod;
use async_trait::async_trait;
use reqwest::Url;
use reqwest::header::{ACCEPT, HeaderValue};
use std::error::Error as StdError;
use std::io::ErrorKind;
use std::time::Duration;
use thiserror::Error;

/// Boxed error carried as the cause of a failed request
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A fully resolved outgoing request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRequest {
    pub method: HttpMethod,
    pub url: Url,
}

/// Status and raw body of a completed HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Low-level failure signals raised by a session
#[derive(Debug, Error)]
pub enum SessionError {
    /// The exchange was cancelled before it completed
    #[error("request was cancelled")]
    Cancelled,

    /// The device has no usable network: no route, interface down, or no
    /// name resolution
    #[error("not connected to the internet: {0}")]
    NotConnected(#[source] BoxError),

    /// Any other failure, including refused connections, TLS failures and
    /// timeouts
    #[error("request failed: {0}")]
    Other(#[source] BoxError),
}

/// Executes a single HTTP exchange.
///
/// Implementors perform exactly one outbound operation per call and keep no
/// per-request state.
#[async_trait]
pub trait Session: Send + Sync {
    async fn send(&self, request: SessionRequest) -> Result<SessionResponse, SessionError>;
}

/// User agent sent with every request
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Production session backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestSession {
    client: reqwest::Client,
}

impl ReqwestSession {
    /// Creates a session whose requests time out after `timeout`
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self { client })
    }

    /// Wraps an already configured client
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Sorts a reqwest failure into the session's failure signals
    ///
    /// The request URL is stripped from the error before it is kept as a
    /// cause, since it carries the query parameters (including the API key).
    fn classify(error: reqwest::Error) -> SessionError {
        let offline = error.is_connect() && has_offline_cause(&error);
        let error = Box::new(error.without_url());

        if offline {
            SessionError::NotConnected(error)
        } else {
            SessionError::Other(error)
        }
    }
}

/// Display prefixes of name resolution failures in the connector's error chain
const DNS_FAILURES: [&str; 2] = ["dns error", "failed to lookup address information"];

/// Walks the source chain looking for a cause that means the network is unusable
///
/// A refused connection or a failed TLS handshake means the host was reached,
/// so neither counts.
fn has_offline_cause(error: &(dyn StdError + 'static)) -> bool {
    let mut current = Some(error);

    while let Some(cause) = current {
        if let Some(io_error) = cause.downcast_ref::<std::io::Error>() {
            if matches!(
                io_error.kind(),
                ErrorKind::NetworkUnreachable | ErrorKind::HostUnreachable | ErrorKind::NetworkDown
            ) {
                return true;
            }
        }

        let message = cause.to_string();
        if DNS_FAILURES.iter().any(|prefix| message.starts_with(prefix)) {
            return true;
        }

        current = cause.source();
    }

    false
}

#[async_trait]
impl Session for ReqwestSession {
    async fn send(&self, request: SessionRequest) -> Result<SessionResponse, SessionError> {
        let response = self
            .client
            .request(request.method.into(), request.url)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .await
            .map_err(Self::classify)?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(Self::classify)?;

        Ok(SessionResponse {
            status,
            body: body.to_vec(),
        })
    }
}
