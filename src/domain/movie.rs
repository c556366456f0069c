use super::{MovieId, dates};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A movie as listed by the discover and search endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub adult: bool,
    pub backdrop_path: Option<String>,
    pub id: MovieId,
    pub overview: String,
    pub popularity: f64,
    pub poster_path: Option<String>,
    #[serde(default, with = "dates::optional")]
    pub release_date: Option<NaiveDate>,
    pub title: String,
    #[serde(default)]
    pub video: bool,
    pub vote_average: f64,
    pub vote_count: u32,
}

/// Full details of a single movie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetail {
    pub adult: bool,
    pub backdrop_path: Option<String>,
    pub belongs_to_collection: Option<Collection>,
    pub budget: u64,
    pub genres: Option<Vec<Genre>>,
    pub homepage: Option<String>,
    pub id: MovieId,
    #[serde(default)]
    pub origin_country: Vec<String>,
    pub original_language: String,
    pub original_title: String,
    pub overview: String,
    pub popularity: f64,
    pub poster_path: Option<String>,
    pub production_companies: Option<Vec<ProductionCompany>>,
    pub production_countries: Option<Vec<ProductionCountry>>,
    #[serde(default, with = "dates::optional")]
    pub release_date: Option<NaiveDate>,
    pub revenue: u64,
    pub runtime: Option<u32>,
    #[serde(default)]
    pub spoken_languages: Vec<SpokenLanguage>,
    pub status: String,
    #[serde(default)]
    pub tagline: String,
    pub title: String,
    #[serde(default)]
    pub video: bool,
    pub vote_average: f64,
    pub vote_count: u32,
    /// Present when the details were requested with `append_to_response=keywords`
    #[serde(default)]
    pub keywords: Option<Keywords>,
}

/// Collection (franchise) a movie belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub id: u64,
    pub name: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionCompany {
    pub id: u64,
    pub logo_path: Option<String>,
    pub name: String,
    pub origin_country: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionCountry {
    pub iso_3166_1: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpokenLanguage {
    pub english_name: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keywords {
    #[serde(default)]
    pub keywords: Vec<Keyword>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyword {
    pub id: u64,
    pub name: String,
}
