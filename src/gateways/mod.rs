//! Entity gateways.
//!
//! A gateway translates one domain operation into a [`Resource`], runs it
//! through a [`DataFetching`] transport and decodes the JSON body into a typed
//! result. Gateways never recover from errors. The only translation they
//! apply is narrowing a transport-level connectivity failure into the
//! domain-level [`OfflineError`].
mod credits;
mod details;
mod discover;
mod person;
mod search;

pub use credits::TmdbMovieCreditsGateway;
pub use details::TmdbMovieDetailsGateway;
pub use discover::TmdbDiscoverMoviesGateway;
pub use person::TmdbPersonDetailsGateway;
pub use search::TmdbSearchMoviesGateway;

use crate::domain::{
    DiscoverMoviesRequest, Movie, MovieCast, MovieDetail, MovieId, OfflineError, PageResult,
    PersonDetails, PersonId,
};
use crate::http_client::{DataFetching, NetworkError, Resource};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// The response body could not be decoded into the expected type
#[derive(Debug, Error)]
#[error("Failed to parse API response: {0}")]
pub struct DecodeError(#[from] serde_json::Error);

/// Errors raised by gateways
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Transport failure other than missing connectivity
    #[error(transparent)]
    Network(NetworkError),

    /// The backend could not be reached because the device is offline
    #[error(transparent)]
    Offline(#[from] OfflineError),

    /// The body was received but did not match the expected schema
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl GatewayError {
    pub fn is_offline(&self) -> bool {
        matches!(self, GatewayError::Offline(_))
    }
}

impl From<NetworkError> for GatewayError {
    fn from(error: NetworkError) -> Self {
        match error {
            NetworkError::NotConnectedToInternet => GatewayError::Offline(OfflineError),
            other => GatewayError::Network(other),
        }
    }
}

/// JSON decoder for API bodies.
///
/// Wire keys are snake_case and dates use `YYYY-MM-DD`; both are handled by
/// the domain types' serde implementations, so the decoder carries no mutable
/// configuration and can be shared freely.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDecoder;

impl JsonDecoder {
    pub fn decode<T: DeserializeOwned>(&self, body: &[u8]) -> Result<T, DecodeError> {
        Ok(serde_json::from_slice(body)?)
    }
}

/// Fetches a resource and decodes its body
async fn fetch_decoded<T: DeserializeOwned>(
    client: &dyn DataFetching,
    decoder: &JsonDecoder,
    resource: &Resource,
) -> Result<T, GatewayError> {
    tracing::debug!(path = resource.path(), query = ?resource.query(), "fetching resource");

    let body = client.fetch(resource).await?;
    Ok(decoder.decode(&body)?)
}

/// Fetches the fixed discovery lists
#[async_trait]
pub trait DiscoverMoviesGateway: Send + Sync {
    async fn fetch(
        &self,
        request: DiscoverMoviesRequest,
        page: u32,
    ) -> Result<PageResult<Movie>, GatewayError>;
}

/// Fetches the full details of a movie
#[async_trait]
pub trait MovieDetailsGateway: Send + Sync {
    async fn fetch_detail(&self, movie_id: MovieId) -> Result<MovieDetail, GatewayError>;
}

/// Fetches cast and crew of a movie
#[async_trait]
pub trait MovieCreditsGateway: Send + Sync {
    async fn fetch_cast(&self, movie_id: MovieId) -> Result<MovieCast, GatewayError>;
}

/// Full-text movie search
#[async_trait]
pub trait SearchMoviesGateway: Send + Sync {
    async fn search(&self, query: &str, page: u32) -> Result<PageResult<Movie>, GatewayError>;
}

/// Fetches biography and images of a person
#[async_trait]
pub trait PersonDetailsGateway: Send + Sync {
    async fn fetch_person_details(&self, person_id: PersonId)
    -> Result<PersonDetails, GatewayError>;
}
