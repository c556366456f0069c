//! Cache-aware movie discovery
//!
//! This module wraps a discover gateway with a cache. Cached pages are
//! served without touching the network, fresh first pages are persisted, and
//! an offline backend degrades to whatever the cache holds.

use crate::cache::{CacheLookup, DiscoverMoviesCache};
use crate::domain::{DiscoverMoviesRequest, Movie, PageResult};
use crate::gateways::{DiscoverMoviesGateway, GatewayError};

/// Only this page is written to the cache
const CACHED_PAGE: u32 = 1;

/// Discovers movies through a gateway, backed by a cache
///
/// The use case is the only layer that recovers from an error: when the
/// gateway reports that the device is offline, the cached movies are returned
/// instead. Every other error reaches the caller unchanged.
pub struct DiscoverMoviesUseCase<G, C>
where
    G: DiscoverMoviesGateway,
    C: DiscoverMoviesCache,
{
    /// The underlying gateway
    gateway: G,
    /// Cache storage for list pages
    cache: C,
}

impl<G, C> DiscoverMoviesUseCase<G, C>
where
    G: DiscoverMoviesGateway,
    C: DiscoverMoviesCache,
{
    /// Creates a new use case from a gateway and a cache
    ///
    /// # Arguments
    ///
    /// * `gateway` - The discover gateway asked on a cache miss
    /// * `cache` - The cache storage holding list pages
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let gateway = TmdbDiscoverMoviesGateway::new(client);
    /// let use_case = DiscoverMoviesUseCase::new(gateway, InMemoryDiscoverCache::new());
    /// ```
    pub fn new(gateway: G, cache: C) -> Self {
        Self { gateway, cache }
    }

    /// Fetches a page of a movie list
    ///
    /// 1. A cached page is returned as is, without a network call.
    /// 2. On a cache miss the gateway is asked. A fresh first page is
    ///    written to the cache before it is returned; later pages are not
    ///    cached.
    /// 3. If the gateway reports the device as offline, the cache is read
    ///    again and its content (possibly nothing) is returned as the page.
    ///
    /// # Arguments
    ///
    /// * `request` - The list to fetch
    /// * `page` - The 1-based page number
    ///
    /// # Returns
    ///
    /// The page of movies. Pages served from the cache carry no paging
    /// metadata of their own, see [`PageResult::from_cached`].
    ///
    /// # Errors
    ///
    /// Any gateway error other than [`GatewayError::Offline`], unchanged.
    pub async fn fetch(
        &self,
        request: DiscoverMoviesRequest,
        page: u32,
    ) -> Result<PageResult<Movie>, GatewayError> {
        // Try to load from cache
        if let CacheLookup::Hit(movies) = self.read_cache(request, page).await {
            tracing::debug!(%request, page, count = movies.len(), "serving movies from cache");
            return Ok(PageResult::from_cached(page, movies));
        }

        // Cache miss - fetch from the underlying gateway
        match self.gateway.fetch(request, page).await {
            Ok(result) => {
                // Store the first page (failures are logged, not returned)
                if page == CACHED_PAGE {
                    self.store(request, page, &result.results).await;
                }
                Ok(result)
            }
            Err(GatewayError::Offline(_)) => {
                // Offline - serve whatever the cache holds now
                tracing::warn!(%request, page, "offline, falling back to cached movies");
                let movies = self.read_cache(request, page).await.into_movies();
                Ok(PageResult::from_cached(page, movies))
            }
            // Anything else reaches the caller unchanged
            Err(error) => Err(error),
        }
    }

    /// Reads the cache, treating a failed read as a miss
    ///
    /// We don't want cache failures to prevent fetching movies.
    async fn read_cache(&self, request: DiscoverMoviesRequest, page: u32) -> CacheLookup {
        match self.cache.read(request, page).await {
            Ok(lookup) => lookup,
            Err(e) => {
                tracing::warn!(%request, page, error = %e, "cache read failed");
                CacheLookup::Miss
            }
        }
    }

    /// Writes fresh movies to the cache; failures are logged and ignored
    async fn store(&self, request: DiscoverMoviesRequest, page: u32, movies: &[Movie]) {
        if let Err(e) = self.cache.write(request, page, movies).await {
            tracing::warn!(%request, page, error = %e, "cache write failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheError;
    use crate::domain::OfflineError;
    use crate::http_client::NetworkError;
    use crate::testing::{mock_movie, mock_page};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Gateway returning a scripted outcome and counting calls
    struct GatewayMock {
        outcome: Mutex<Option<Result<PageResult<Movie>, GatewayError>>>,
        calls: Mutex<usize>,
    }

    impl GatewayMock {
        fn returning(result: PageResult<Movie>) -> Self {
            Self::with_outcome(Ok(result))
        }

        fn failing(error: GatewayError) -> Self {
            Self::with_outcome(Err(error))
        }

        fn with_outcome(outcome: Result<PageResult<Movie>, GatewayError>) -> Self {
            Self {
                outcome: Mutex::new(Some(outcome)),
                calls: Mutex::new(0),
            }
        }

        fn call_count(&self) -> usize {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl DiscoverMoviesGateway for &GatewayMock {
        async fn fetch(
            &self,
            _request: DiscoverMoviesRequest,
            _page: u32,
        ) -> Result<PageResult<Movie>, GatewayError> {
            *self.calls.lock().unwrap() += 1;
            self.outcome
                .lock()
                .unwrap()
                .take()
                .expect("gateway called more than once")
        }
    }

    /// Cache answering reads from a script and recording writes
    #[derive(Default)]
    struct CacheMock {
        reads: Mutex<VecDeque<Result<CacheLookup, CacheError>>>,
        read_count: Mutex<usize>,
        writes: Mutex<Vec<(DiscoverMoviesRequest, u32, Vec<Movie>)>>,
        fail_writes: bool,
    }

    impl CacheMock {
        fn with_reads(reads: Vec<Result<CacheLookup, CacheError>>) -> Self {
            Self {
                reads: Mutex::new(reads.into()),
                ..Self::default()
            }
        }

        fn read_count(&self) -> usize {
            *self.read_count.lock().unwrap()
        }

        fn writes(&self) -> Vec<(DiscoverMoviesRequest, u32, Vec<Movie>)> {
            self.writes.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl DiscoverMoviesCache for &CacheMock {
        async fn read(
            &self,
            _request: DiscoverMoviesRequest,
            _page: u32,
        ) -> Result<CacheLookup, CacheError> {
            *self.read_count.lock().unwrap() += 1;
            self.reads
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Ok(CacheLookup::Miss))
        }

        async fn write(
            &self,
            request: DiscoverMoviesRequest,
            page: u32,
            movies: &[Movie],
        ) -> Result<(), CacheError> {
            self.writes
                .lock()
                .unwrap()
                .push((request, page, movies.to_vec()));
            if self.fail_writes {
                return Err(CacheError::CacheDirectoryNotFound);
            }
            Ok(())
        }
    }

    fn two_movies() -> Vec<Movie> {
        vec![mock_movie("Test Movie 1"), mock_movie("Test Movie 2")]
    }

    fn titles(result: &PageResult<Movie>) -> Vec<&str> {
        result.results.iter().map(|m| m.title.as_str()).collect()
    }

    #[tokio::test]
    async fn test_cache_hit_skips_gateway() {
        let gateway = GatewayMock::returning(mock_page(two_movies()));
        let cache = CacheMock::with_reads(vec![Ok(CacheLookup::Hit(vec![mock_movie("Cached")]))]);
        let use_case = DiscoverMoviesUseCase::new(&gateway, &cache);

        let result = use_case
            .fetch(DiscoverMoviesRequest::Popular, 1)
            .await
            .unwrap();

        assert_eq!(titles(&result), ["Cached"]);
        assert_eq!(gateway.call_count(), 0);
        assert!(cache.writes().is_empty());
    }

    #[tokio::test]
    async fn test_first_page_is_fetched_and_saved() {
        let gateway = GatewayMock::returning(mock_page(two_movies()));
        let cache = CacheMock::default();
        let use_case = DiscoverMoviesUseCase::new(&gateway, &cache);

        let result = use_case
            .fetch(DiscoverMoviesRequest::Popular, 1)
            .await
            .unwrap();

        assert_eq!(result.page, 1);
        assert_eq!(titles(&result), ["Test Movie 1", "Test Movie 2"]);
        assert_eq!(gateway.call_count(), 1);
        assert_eq!(
            cache.writes(),
            vec![(DiscoverMoviesRequest::Popular, 1, two_movies())]
        );
    }

    #[tokio::test]
    async fn test_other_pages_are_not_saved() {
        let gateway = GatewayMock::returning(mock_page(two_movies()));
        let cache = CacheMock::default();
        let use_case = DiscoverMoviesUseCase::new(&gateway, &cache);

        let result = use_case
            .fetch(DiscoverMoviesRequest::Popular, 2)
            .await
            .unwrap();

        assert_eq!(titles(&result), ["Test Movie 1", "Test Movie 2"]);
        assert_eq!(gateway.call_count(), 1);
        assert!(cache.writes().is_empty());
    }

    #[tokio::test]
    async fn test_offline_falls_back_to_cache() {
        let gateway = GatewayMock::failing(GatewayError::Offline(OfflineError));
        // The first read misses; by the time the gateway gives up, the key holds movies.
        let cache = CacheMock::with_reads(vec![
            Ok(CacheLookup::Miss),
            Ok(CacheLookup::Hit(vec![
                mock_movie("Cached Movie 1"),
                mock_movie("Cached Movie 2"),
            ])),
        ]);
        let use_case = DiscoverMoviesUseCase::new(&gateway, &cache);

        let result = use_case
            .fetch(DiscoverMoviesRequest::Popular, 1)
            .await
            .unwrap();

        assert_eq!(titles(&result), ["Cached Movie 1", "Cached Movie 2"]);
        assert_eq!(result.total_results, 2);
        assert_eq!(cache.read_count(), 2);
        assert!(cache.writes().is_empty());
    }

    #[tokio::test]
    async fn test_offline_with_empty_cache_returns_empty_page() {
        let gateway = GatewayMock::failing(GatewayError::Offline(OfflineError));
        let cache = CacheMock::default();
        let use_case = DiscoverMoviesUseCase::new(&gateway, &cache);

        let result = use_case
            .fetch(DiscoverMoviesRequest::Upcoming, 3)
            .await
            .unwrap();

        assert!(result.is_empty());
        assert_eq!(result.page, 3);
    }

    #[tokio::test]
    async fn test_other_errors_are_rethrown_without_saving() {
        let cases = [
            NetworkError::InvalidResponse,
            NetworkError::Cancelled,
            NetworkError::Network("mock error".into()),
        ];

        for thrown in cases {
            let expected = thrown.to_string();
            let gateway = GatewayMock::failing(GatewayError::Network(thrown));
            let cache = CacheMock::default();
            let use_case = DiscoverMoviesUseCase::new(&gateway, &cache);

            let error = use_case
                .fetch(DiscoverMoviesRequest::Popular, 1)
                .await
                .unwrap_err();

            match error {
                GatewayError::Network(error) => assert_eq!(error.to_string(), expected),
                other => panic!("expected network error, got {other:?}"),
            }
            assert_eq!(gateway.call_count(), 1);
            assert_eq!(cache.read_count(), 1);
            assert!(cache.writes().is_empty());
        }
    }

    #[tokio::test]
    async fn test_decode_errors_are_rethrown() {
        let decode = serde_json::from_str::<u32>("nope").unwrap_err();
        let gateway = GatewayMock::failing(GatewayError::Decode(decode.into()));
        let cache = CacheMock::default();
        let use_case = DiscoverMoviesUseCase::new(&gateway, &cache);

        let error = use_case
            .fetch(DiscoverMoviesRequest::TopRated, 1)
            .await
            .unwrap_err();

        assert!(matches!(error, GatewayError::Decode(_)));
    }

    #[tokio::test]
    async fn test_cache_read_failure_is_treated_as_miss() {
        let gateway = GatewayMock::returning(mock_page(two_movies()));
        let cache = CacheMock::with_reads(vec![Err(CacheError::CacheDirectoryNotFound)]);
        let use_case = DiscoverMoviesUseCase::new(&gateway, &cache);

        let result = use_case
            .fetch(DiscoverMoviesRequest::NowPlaying, 1)
            .await
            .unwrap();

        assert_eq!(result.results.len(), 2);
        assert_eq!(gateway.call_count(), 1);
    }

    #[tokio::test]
    async fn test_cache_write_failure_still_returns_fresh_movies() {
        let gateway = GatewayMock::returning(mock_page(two_movies()));
        let cache = CacheMock {
            fail_writes: true,
            ..CacheMock::default()
        };
        let use_case = DiscoverMoviesUseCase::new(&gateway, &cache);

        let result = use_case
            .fetch(DiscoverMoviesRequest::Popular, 1)
            .await
            .unwrap();

        assert_eq!(titles(&result), ["Test Movie 1", "Test Movie 2"]);
        assert_eq!(cache.writes().len(), 1);
    }

    #[tokio::test]
    async fn test_first_page_is_served_from_in_memory_cache_afterwards() {
        let gateway = GatewayMock::returning(mock_page(two_movies()));
        let cache = std::sync::Arc::new(crate::cache::InMemoryDiscoverCache::new());
        let use_case = DiscoverMoviesUseCase::new(&gateway, cache.clone());

        let fresh = use_case
            .fetch(DiscoverMoviesRequest::Popular, 1)
            .await
            .unwrap();
        let cached = use_case
            .fetch(DiscoverMoviesRequest::Popular, 1)
            .await
            .unwrap();

        assert_eq!(fresh.results, cached.results);
        assert_eq!(gateway.call_count(), 1);
    }
}
