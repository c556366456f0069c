use super::{GatewayError, JsonDecoder, SearchMoviesGateway, fetch_decoded};
use crate::domain::{Movie, PageResult};
use crate::http_client::{DataFetching, Resource};
use async_trait::async_trait;
use std::sync::Arc;

/// Title search gateway.
pub struct TmdbSearchMoviesGateway {
    client: Arc<dyn DataFetching>,
    decoder: JsonDecoder,
}

impl TmdbSearchMoviesGateway {
    /// Creates a gateway for the movie search endpoint
    ///
    /// # Arguments
    ///
    /// * `client` - The transport executing the requests
    pub fn new(client: Arc<dyn DataFetching>) -> Self {
        Self {
            client,
            decoder: JsonDecoder,
        }
    }
}

#[async_trait]
impl SearchMoviesGateway for TmdbSearchMoviesGateway {
    async fn search(&self, query: &str, page: u32) -> Result<PageResult<Movie>, GatewayError> {
        let resource = Resource::get("/search/movie")
            .with_query("query", query)
            .with_query("page", page);
        fetch_decoded(self.client.as_ref(), &self.decoder, &resource).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::NetworkError;
    use crate::testing::{DataFetchingMock, mock_movie, mock_page};

    #[tokio::test]
    async fn test_search_decodes_results() {
        let page = mock_page(vec![mock_movie("Test Movie")]);
        let client = Arc::new(DataFetchingMock::returning_json(&page));
        let gateway = TmdbSearchMoviesGateway::new(client.clone());

        let result = gateway.search("test movie", 2).await.unwrap();

        assert_eq!(result.results.len(), 1);
        assert_eq!(result.results[0].title, "Test Movie");
        assert_eq!(client.call_count(), 1);

        let resource = client.last_resource();
        assert_eq!(resource.path(), "/search/movie");
        assert_eq!(
            resource.query().get("query").map(String::as_str),
            Some("test movie")
        );
        assert_eq!(resource.query().get("page").map(String::as_str), Some("2"));
    }

    #[tokio::test]
    async fn test_empty_results_are_a_valid_page() {
        let client = Arc::new(DataFetchingMock::returning(
            r#"{"page": 1, "results": [], "total_pages": 0, "total_results": 0}"#,
        ));

        let result = TmdbSearchMoviesGateway::new(client)
            .search("zzzz", 1)
            .await
            .unwrap();

        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_not_connected_becomes_offline() {
        let client = Arc::new(DataFetchingMock::failing(NetworkError::NotConnectedToInternet));
        let gateway = TmdbSearchMoviesGateway::new(client.clone());

        let error = gateway.search("test movie", 1).await.unwrap_err();

        assert!(error.is_offline());
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn test_errors_are_rethrown() {
        let client = Arc::new(DataFetchingMock::failing(NetworkError::Network(
            "mock error".into(),
        )));

        let error = TmdbSearchMoviesGateway::new(client.clone())
            .search("", 1)
            .await
            .unwrap_err();

        assert!(matches!(error, GatewayError::Network(NetworkError::Network(_))));
        assert_eq!(client.call_count(), 1);
    }
}
