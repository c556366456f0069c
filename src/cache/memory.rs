use super::{CacheError, CacheLookup, DiscoverMoviesCache};
use crate::domain::{DiscoverMoviesRequest, Movie};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Process-local cache; entries live as long as the cache value.
#[derive(Debug, Default)]
pub struct InMemoryDiscoverCache {
    entries: RwLock<HashMap<(DiscoverMoviesRequest, u32), Vec<Movie>>>,
}

impl InMemoryDiscoverCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored pages
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl DiscoverMoviesCache for InMemoryDiscoverCache {
    async fn read(
        &self,
        request: DiscoverMoviesRequest,
        page: u32,
    ) -> Result<CacheLookup, CacheError> {
        let entries = self.entries.read().await;
        Ok(entries
            .get(&(request, page))
            .map(|movies| CacheLookup::Hit(movies.clone()))
            .unwrap_or(CacheLookup::Miss))
    }

    async fn write(
        &self,
        request: DiscoverMoviesRequest,
        page: u32,
        movies: &[Movie],
    ) -> Result<(), CacheError> {
        let mut entries = self.entries.write().await;
        entries.insert((request, page), movies.to_vec());
        Ok(())
    }
}
