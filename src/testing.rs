//! Shared test doubles and fixtures.

use crate::domain::{Movie, MovieId, PageResult};
use crate::http_client::{DataFetching, NetworkError, Resource};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Mutex;

/// Transport double returning one scripted outcome and recording resources
pub(crate) struct DataFetchingMock {
    outcome: Mutex<Option<Result<Vec<u8>, NetworkError>>>,
    resources: Mutex<Vec<Resource>>,
}

impl DataFetchingMock {
    pub fn returning(body: impl Into<Vec<u8>>) -> Self {
        Self::with_outcome(Ok(body.into()))
    }

    pub fn returning_json(value: &impl Serialize) -> Self {
        Self::returning(serde_json::to_vec(value).unwrap())
    }

    pub fn failing(error: NetworkError) -> Self {
        Self::with_outcome(Err(error))
    }

    fn with_outcome(outcome: Result<Vec<u8>, NetworkError>) -> Self {
        Self {
            outcome: Mutex::new(Some(outcome)),
            resources: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.resources.lock().unwrap().len()
    }

    pub fn last_resource(&self) -> Resource {
        self.resources.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl DataFetching for DataFetchingMock {
    async fn fetch(&self, resource: &Resource) -> Result<Vec<u8>, NetworkError> {
        self.resources.lock().unwrap().push(resource.clone());
        self.outcome
            .lock()
            .unwrap()
            .take()
            .expect("no outcome scripted for this fetch")
    }
}

pub(crate) fn mock_movie(title: &str) -> Movie {
    Movie {
        adult: false,
        backdrop_path: Some("/mockBackdrop.jpg".to_string()),
        id: MovieId(1),
        overview: "This is a mock movie for testing purposes.".to_string(),
        popularity: 10.0,
        poster_path: Some("/mockPoster.jpg".to_string()),
        release_date: NaiveDate::from_ymd_opt(2024, 5, 17),
        title: title.to_string(),
        video: false,
        vote_average: 8.5,
        vote_count: 100,
    }
}

pub(crate) fn mock_page(results: Vec<Movie>) -> PageResult<Movie> {
    PageResult {
        page: 1,
        total_pages: 1,
        total_results: results.len() as u32,
        results,
    }
}
