//! Generic HTTP transport.
//!
//! This module turns a declarative [`Resource`] into a request against the
//! configured [`Environment`], dispatches it through a [`Session`] and
//! normalizes every failure into the closed [`NetworkError`] taxonomy.
//! Response bodies are returned as raw bytes; decoding is left to the gateways.
mod interceptor;
mod resource;
mod session;

pub use interceptor::{
    ApiKeyInterceptor, DefaultQueryInterceptor, InterceptorChain, NoopInterceptor, UrlInterceptor,
};
pub use resource::{Environment, HttpMethod, RequestComponents, Resource};
pub use session::{
    BoxError, ReqwestSession, Session, SessionError, SessionRequest, SessionResponse,
};

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Errors that can occur while executing a resource
#[derive(Debug, Error)]
pub enum NetworkError {
    /// The request failed for a reason other than the ones below
    #[error("Network error: {0}")]
    Network(#[source] BoxError),

    /// The server answered with a non-2xx status, or no valid request could be built
    #[error("Invalid response")]
    InvalidResponse,

    /// The request was cancelled by the caller
    #[error("Request cancelled")]
    Cancelled,

    /// The device has no connectivity
    #[error("Not connected to the internet")]
    NotConnectedToInternet,
}

impl From<SessionError> for NetworkError {
    fn from(error: SessionError) -> Self {
        match error {
            SessionError::Cancelled => NetworkError::Cancelled,
            SessionError::NotConnected(_) => NetworkError::NotConnectedToInternet,
            SessionError::Other(cause) => NetworkError::Network(cause),
        }
    }
}

/// Trait for components that can execute a resource and return its body.
#[async_trait]
pub trait DataFetching: Send + Sync {
    /// Fetches the raw response body for a resource.
    ///
    /// # Errors
    ///
    /// Returns exactly one [`NetworkError`] variant per failure.
    async fn fetch(&self, resource: &Resource) -> Result<Vec<u8>, NetworkError>;
}

#[async_trait]
impl<T> DataFetching for Arc<T>
where
    T: DataFetching + ?Sized,
{
    async fn fetch(&self, resource: &Resource) -> Result<Vec<u8>, NetworkError> {
        (**self).fetch(resource).await
    }
}

/// Transport executing resources against a fixed environment.
///
/// The client holds no per-call state; it can be shared between tasks and
/// used for concurrent fetches.
pub struct HttpClient<S = ReqwestSession> {
    session: S,
    environment: Environment,
    interceptor: Arc<dyn UrlInterceptor>,
    cancellation: CancellationToken,
}

impl<S: Session> HttpClient<S> {
    /// Creates a new client for the given session and environment
    pub fn new(
        session: S,
        environment: Environment,
        interceptor: Arc<dyn UrlInterceptor>,
    ) -> Self {
        Self {
            session,
            environment,
            interceptor,
            cancellation: CancellationToken::new(),
        }
    }

    /// Ties the client to a cancellation token.
    ///
    /// Once the token is cancelled, in-flight and future fetches through this
    /// client fail with [`NetworkError::Cancelled`].
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Builds the outgoing request for a resource
    fn request_for(&self, resource: &Resource) -> Result<SessionRequest, NetworkError> {
        let mut components = RequestComponents::new(&self.environment, resource);
        self.interceptor.intercept(&mut components);

        let url = components.to_url().map_err(|reason| {
            tracing::error!(
                host = components.host(),
                path = components.path(),
                %reason,
                "cannot build request URL"
            );
            NetworkError::InvalidResponse
        })?;

        Ok(SessionRequest {
            method: resource.method(),
            url,
        })
    }
}

#[async_trait]
impl<S: Session> DataFetching for HttpClient<S> {
    async fn fetch(&self, resource: &Resource) -> Result<Vec<u8>, NetworkError> {
        if self.cancellation.is_cancelled() {
            return Err(NetworkError::Cancelled);
        }

        let request = self.request_for(resource)?;
        tracing::debug!(method = %request.method, path = resource.path(), "dispatching request");

        let outcome = tokio::select! {
            biased;
            _ = self.cancellation.cancelled() => return Err(NetworkError::Cancelled),
            outcome = self.session.send(request) => outcome,
        };
        let response = outcome.map_err(NetworkError::from)?;

        if !(200..300).contains(&response.status) {
            tracing::warn!(
                status = response.status,
                path = resource.path(),
                "request returned an unsuccessful status"
            );
            return Err(NetworkError::InvalidResponse);
        }

        Ok(response.body)
    }
}
