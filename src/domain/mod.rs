//! Domain types of the movie catalog.
//!
//! Entities are plain value records produced by decoding API responses. They
//! carry no behavior and are owned by whoever decoded them. Field names follow
//! the snake_case keys used on the wire, so the derived serde implementations
//! map them one to one.
pub(crate) mod dates;
mod credits;
mod movie;
mod person;

pub use credits::{MovieCast, Person};
pub use dates::DATE_FORMAT;
pub use movie::{
    Collection, Genre, Keyword, Keywords, Movie, MovieDetail, ProductionCompany,
    ProductionCountry, SpokenLanguage,
};
pub use person::{PersonDetails, PersonImage, PersonImages};

use crate::http_client::Resource;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// Identifier of a movie
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(pub u64);

impl From<u64> for MovieId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl Display for MovieId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a person (cast, crew or otherwise)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(pub u64);

impl From<u64> for PersonId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl Display for PersonId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raised when an operation could not reach the backend because the device
/// is offline.
///
/// Distinct from the transport's error taxonomy so callers can pick an
/// offline fallback without knowing transport internals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Error)]
#[error("Offline: no connection to the movie database")]
pub struct OfflineError;

/// A page of results as returned by list endpoints.
///
/// `results` keeps the server order. An empty `results` list is a valid page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResult<T> {
    pub page: u32,
    pub results: Vec<T>,
    pub total_pages: u32,
    pub total_results: u32,
}

impl<T> PageResult<T> {
    /// Wraps items restored from a cache.
    ///
    /// Paging metadata is not cached, so the page is reported as the last one
    /// and the total is the number of restored items.
    pub fn from_cached(page: u32, results: Vec<T>) -> Self {
        let total_results = u32::try_from(results.len()).unwrap_or(u32::MAX);
        Self {
            page,
            results,
            total_pages: page,
            total_results,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// The fixed movie lists offered for discovery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscoverMoviesRequest {
    NowPlaying,
    Popular,
    TopRated,
    Upcoming,
}

impl DiscoverMoviesRequest {
    pub const ALL: [Self; 4] = [
        Self::NowPlaying,
        Self::Popular,
        Self::TopRated,
        Self::Upcoming,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NowPlaying => "now_playing",
            Self::Popular => "popular",
            Self::TopRated => "top_rated",
            Self::Upcoming => "upcoming",
        }
    }

    /// API path of the list
    pub const fn path(self) -> &'static str {
        match self {
            Self::NowPlaying => "/movie/now_playing",
            Self::Popular => "/movie/popular",
            Self::TopRated => "/movie/top_rated",
            Self::Upcoming => "/movie/upcoming",
        }
    }

    /// Resource of the list, without paging parameters
    pub fn resource(self) -> Resource {
        Resource::get(self.path())
    }
}

impl Display for DiscoverMoviesRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
