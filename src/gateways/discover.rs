use super::{DiscoverMoviesGateway, GatewayError, JsonDecoder, fetch_decoded};
use crate::domain::{DiscoverMoviesRequest, Movie, PageResult};
use crate::http_client::DataFetching;
use async_trait::async_trait;
use std::sync::Arc;

/// Discover gateway for the TMDB movie lists.
pub struct TmdbDiscoverMoviesGateway {
    client: Arc<dyn DataFetching>,
    decoder: JsonDecoder,
}

impl TmdbDiscoverMoviesGateway {
    /// Creates a gateway for the discover lists endpoint
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
impl DiscoverMoviesGateway for TmdbDiscoverMoviesGateway {
    async fn fetch(
        &self,
        request: DiscoverMoviesRequest,
        page: u32,
    ) -> Result<PageResult<Movie>, GatewayError> {
        let resource = request.resource().with_query("page", page);
        fetch_decoded(self.client.as_ref(), &self.decoder, &resource).await
    }
}
