use super::{GatewayError, JsonDecoder, PersonDetailsGateway, fetch_decoded};
use crate::domain::{PersonDetails, PersonId};
use crate::http_client::{DataFetching, Resource};
use async_trait::async_trait;
use std::sync::Arc;

/// Person details gateway, including profile images
pub struct TmdbPersonDetailsGateway {
    client: Arc<dyn DataFetching>,
    decoder: JsonDecoder,
}

impl TmdbPersonDetailsGateway {
    /// Creates a gateway for the person details endpoint
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
impl PersonDetailsGateway for TmdbPersonDetailsGateway {
    async fn fetch_person_details(
        &self,
        person_id: PersonId,
    ) -> Result<PersonDetails, GatewayError> {
        let resource = Resource::get(format!("/person/{}", person_id))
            .with_query("append_to_response", "images");
        fetch_decoded(self.client.as_ref(), &self.decoder, &resource).await
    }
}
