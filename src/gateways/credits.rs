use super::{GatewayError, JsonDecoder, MovieCreditsGateway, fetch_decoded};
use crate::domain::{MovieCast, MovieId};
use crate::http_client::{DataFetching, Resource};
use async_trait::async_trait;
use std::sync::Arc;

pub struct TmdbMovieCreditsGateway {
    client: Arc<dyn DataFetching>,
    decoder: JsonDecoder,
}

impl TmdbMovieCreditsGateway {
    /// Creates a gateway for the movie credits endpoint
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
impl MovieCreditsGateway for TmdbMovieCreditsGateway {
    async fn fetch_cast(&self, movie_id: MovieId) -> Result<MovieCast, GatewayError> {
        let resource = Resource::get(format!("/movie/{}/credits", movie_id));
        fetch_decoded(self.client.as_ref(), &self.decoder, &resource).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Person, PersonId};
    use crate::http_client::NetworkError;
    use crate::testing::DataFetchingMock;

    fn mock_person(id: u64) -> Person {
        Person {
            id: PersonId(id),
            name: "Mock Person".to_string(),
            known_for_department: None,
            original_name: None,
            popularity: None,
            profile_path: None,
            cast_id: None,
            character: None,
            credit_id: None,
            department: None,
            job: None,
        }
    }

    #[tokio::test]
    async fn test_fetch_cast_decodes_body() {
        let cast = MovieCast {
            id: 777,
            cast: vec![mock_person(1)],
            crew: vec![mock_person(2)],
        };
        let client = Arc::new(DataFetchingMock::returning_json(&cast));
        let gateway = TmdbMovieCreditsGateway::new(client.clone());

        let result = gateway.fetch_cast(MovieId(777)).await.unwrap();

        assert_eq!(result.id, 777);
        assert_eq!(result, cast);
        assert_eq!(client.last_resource().path(), "/movie/777/credits");
    }

    #[tokio::test]
    async fn test_not_connected_becomes_offline() {
        let client = Arc::new(DataFetchingMock::failing(NetworkError::NotConnectedToInternet));

        let error = TmdbMovieCreditsGateway::new(client)
            .fetch_cast(MovieId(0))
            .await
            .unwrap_err();

        assert!(error.is_offline());
    }

    #[tokio::test]
    async fn test_invalid_response_is_not_reclassified() {
        let client = Arc::new(DataFetchingMock::failing(NetworkError::InvalidResponse));

        let error = TmdbMovieCreditsGateway::new(client)
            .fetch_cast(MovieId(0))
            .await
            .unwrap_err();

        assert!(matches!(
            error,
            GatewayError::Network(NetworkError::InvalidResponse)
        ));
    }
}
