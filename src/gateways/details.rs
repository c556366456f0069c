use super::{GatewayError, JsonDecoder, MovieDetailsGateway, fetch_decoded};
use crate::domain::{MovieDetail, MovieId};
use crate::http_client::{DataFetching, Resource};
use async_trait::async_trait;
use std::sync::Arc;

/// Movie details gateway.
///
/// Keywords are requested in the same call via `append_to_response`.
pub struct TmdbMovieDetailsGateway {
    client: Arc<dyn DataFetching>,
    decoder: JsonDecoder,
}

impl TmdbMovieDetailsGateway {
    /// Creates a gateway for the movie details endpoint
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

    fn resource(movie_id: MovieId) -> Resource {
        Resource::get(format!("/movie/{}", movie_id)).with_query("append_to_response", "keywords")
    }
}

#[async_trait]
impl MovieDetailsGateway for TmdbMovieDetailsGateway {
    async fn fetch_detail(&self, movie_id: MovieId) -> Result<MovieDetail, GatewayError> {
        fetch_decoded(self.client.as_ref(), &self.decoder, &Self::resource(movie_id)).await
    }
}
