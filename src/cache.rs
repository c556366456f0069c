//! Cache storage for discovered movie lists
//!
//! The discover use case treats its cache as an opaque key-value store keyed
//! by list and page. This module defines that contract and provides two
//! stores: an in-memory map and JSON files in the system's standard cache
//! directory.
mod file;
mod memory;

pub use file::FileDiscoverCache;
pub use memory::InMemoryDiscoverCache;

use crate::domain::{DiscoverMoviesRequest, Movie};
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur during cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    /// Failed to determine cache directory location
    #[error("Failed to determine cache directory location")]
    CacheDirectoryNotFound,

    /// Failed to create or access cache directory
    #[error("Failed to create cache directory at {path}: {source}")]
    DirectoryCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to read cached data
    #[error("Failed to read cache file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write cached data
    #[error("Failed to write cache file {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to deserialize cached data
    #[error("Failed to deserialize cache file {path}: {source}")]
    DeserializationFailed {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Failed to serialize data for caching
    #[error("Failed to serialize data: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

/// Result of a cache read.
///
/// A stored empty page is a `Hit` with no items and is distinct from a `Miss`,
/// where nothing was stored for the key.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheLookup {
    Hit(Vec<Movie>),
    Miss,
}

impl CacheLookup {
    /// Returns the cached items, or an empty list on a miss
    pub fn into_movies(self) -> Vec<Movie> {
        match self {
            CacheLookup::Hit(movies) => movies,
            CacheLookup::Miss => Vec::new(),
        }
    }
}

/// Persistent store for discovered movie lists, keyed by `(request, page)`.
///
/// A write for one key must leave every other key untouched.
#[async_trait]
pub trait DiscoverMoviesCache: Send + Sync {
    /// Reads the movies stored for a list page
    async fn read(
        &self,
        request: DiscoverMoviesRequest,
        page: u32,
    ) -> Result<CacheLookup, CacheError>;

    /// Replaces the movies stored for a list page
    async fn write(
        &self,
        request: DiscoverMoviesRequest,
        page: u32,
        movies: &[Movie],
    ) -> Result<(), CacheError>;
}

#[async_trait]
impl<T> DiscoverMoviesCache for Arc<T>
where
    T: DiscoverMoviesCache + ?Sized,
{
    async fn read(
        &self,
        request: DiscoverMoviesRequest,
        page: u32,
    ) -> Result<CacheLookup, CacheError> {
        (**self).read(request, page).await
    }

    async fn write(
        &self,
        request: DiscoverMoviesRequest,
        page: u32,
        movies: &[Movie],
    ) -> Result<(), CacheError> {
        (**self).write(request, page, movies).await
    }
}
