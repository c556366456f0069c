//! Movie Catalog - client-side data access for a movie database
//!
//! This library turns domain requests (discover, search, detail, credits,
//! person details) into HTTP calls against a TMDB-style REST backend, decodes
//! the typed responses, and reconciles discovered lists with a local cache so
//! the catalog keeps working while offline.
//!
//! The pipeline flows one way: use case → gateway → transport → network.
//!
//! - [`http_client`] builds URLs from declarative resources and normalizes
//!   transport failures into [`NetworkError`].
//! - [`gateways`] map domain requests to resources and decode responses,
//!   narrowing connectivity failures into [`OfflineError`].
//! - [`DiscoverMoviesUseCase`] serves cached lists, refreshes them from the
//!   network and falls back to the cache when offline.

mod cache;
mod config;
mod discover_movies;
mod domain;
pub mod gateways;
pub mod http_client;
#[cfg(test)]
mod testing;

pub use cache::{
    CacheError, CacheLookup, DiscoverMoviesCache, FileDiscoverCache, InMemoryDiscoverCache,
};
pub use config::{
    API_HOST_VAR, API_KEY_VAR, CACHE_DIR_VAR, CatalogConfig, ConfigError, TIMEOUT_VAR,
    parse_timeout,
};
pub use discover_movies::DiscoverMoviesUseCase;
pub use domain::*;
pub use gateways::{DecodeError, GatewayError};
pub use http_client::NetworkError;

use gateways::{
    MovieCreditsGateway, MovieDetailsGateway, PersonDetailsGateway, SearchMoviesGateway,
    TmdbDiscoverMoviesGateway, TmdbMovieCreditsGateway, TmdbMovieDetailsGateway,
    TmdbPersonDetailsGateway, TmdbSearchMoviesGateway,
};
use http_client::{
    ApiKeyInterceptor, DataFetching, HttpClient, NoopInterceptor, ReqwestSession, UrlInterceptor,
};
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Top-level error type for composing a catalog
#[derive(Debug, Error)]
pub enum MovieCatalogError {
    /// Error while reading the configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    /// Error during cache operations
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    /// Error while fetching from the movie database
    #[error("Movie database error: {0}")]
    Gateway(#[from] GatewayError),
}

/// Entry point for every catalog operation
///
/// All collaborators are passed in explicitly; the catalog holds no state that
/// changes per call, so a single instance can serve concurrent requests.
pub struct MovieCatalog<C: DiscoverMoviesCache> {
    discover: DiscoverMoviesUseCase<TmdbDiscoverMoviesGateway, C>,
    details: TmdbMovieDetailsGateway,
    credits: TmdbMovieCreditsGateway,
    search: TmdbSearchMoviesGateway,
    person: TmdbPersonDetailsGateway,
}

impl<C: DiscoverMoviesCache> MovieCatalog<C> {
    /// Composes a catalog from a transport and a discover cache
    pub fn new(client: Arc<dyn DataFetching>, cache: C) -> Self {
        Self {
            discover: DiscoverMoviesUseCase::new(
                TmdbDiscoverMoviesGateway::new(client.clone()),
                cache,
            ),
            details: TmdbMovieDetailsGateway::new(client.clone()),
            credits: TmdbMovieCreditsGateway::new(client.clone()),
            search: TmdbSearchMoviesGateway::new(client.clone()),
            person: TmdbPersonDetailsGateway::new(client),
        }
    }

    /// Composes a catalog talking to the configured backend over reqwest
    ///
    /// Every fetch fails with [`NetworkError::Cancelled`] once `cancellation`
    /// is cancelled.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use movie_catalog::{CatalogConfig, DiscoverMoviesRequest, InMemoryDiscoverCache, MovieCatalog};
    /// use tokio_util::sync::CancellationToken;
    ///
    /// # async fn run() -> Result<(), movie_catalog::MovieCatalogError> {
    /// let config = CatalogConfig::from_env()?;
    /// let catalog = MovieCatalog::from_config(
    ///     &config,
    ///     InMemoryDiscoverCache::new(),
    ///     CancellationToken::new(),
    /// )?;
    ///
    /// let popular = catalog
    ///     .discover_movies(DiscoverMoviesRequest::Popular, 1)
    ///     .await?;
    /// for movie in &popular.results {
    ///     println!("{}", movie.title);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_config(
        config: &CatalogConfig,
        cache: C,
        cancellation: CancellationToken,
    ) -> Result<Self, MovieCatalogError> {
        let session = ReqwestSession::new(config.request_timeout)?;
        let interceptor: Arc<dyn UrlInterceptor> = match &config.api_key {
            Some(api_key) => Arc::new(ApiKeyInterceptor::new(api_key.clone())),
            None => {
                tracing::warn!("no API key configured, requests are sent unauthenticated");
                Arc::new(NoopInterceptor)
            }
        };

        let client = HttpClient::new(session, config.environment.clone(), interceptor)
            .with_cancellation(cancellation);

        Ok(Self::new(Arc::new(client), cache))
    }

    /// Fetches a page of a movie list, cache first
    pub async fn discover_movies(
        &self,
        request: DiscoverMoviesRequest,
        page: u32,
    ) -> Result<PageResult<Movie>, GatewayError> {
        self.discover.fetch(request, page).await
    }

    pub async fn fetch_detail(&self, movie_id: MovieId) -> Result<MovieDetail, GatewayError> {
        self.details.fetch_detail(movie_id).await
    }

    pub async fn fetch_cast(&self, movie_id: MovieId) -> Result<MovieCast, GatewayError> {
        self.credits.fetch_cast(movie_id).await
    }

    pub async fn search(&self, query: &str, page: u32) -> Result<PageResult<Movie>, GatewayError> {
        self.search.search(query, page).await
    }

    pub async fn fetch_person_details(
        &self,
        person_id: PersonId,
    ) -> Result<PersonDetails, GatewayError> {
        self.person.fetch_person_details(person_id).await
    }
}
