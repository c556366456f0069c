use super::PersonId;
use serde::{Deserialize, Serialize};

/// Biography and profile images of a person
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonDetails {
    pub adult: bool,
    #[serde(default)]
    pub also_known_as: Vec<String>,
    #[serde(default)]
    pub biography: String,
    pub gender: u8,
    pub id: PersonId,
    pub known_for_department: Option<String>,
    pub name: String,
    pub popularity: f64,
    /// Present when requested with `append_to_response=images`
    #[serde(default)]
    pub images: PersonImages,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonImages {
    #[serde(default)]
    pub profiles: Vec<PersonImage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonImage {
    pub file_path: String,
}
