use super::PersonId;
use serde::{Deserialize, Serialize};

/// Cast and crew of a movie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieCast {
    pub id: u64,
    #[serde(default)]
    pub cast: Vec<Person>,
    #[serde(default)]
    pub crew: Vec<Person>,
}

/// A credited person.
///
/// Cast members carry `character` and `cast_id`, crew members carry
/// `department` and `job`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub known_for_department: Option<String>,
    pub original_name: Option<String>,
    pub popularity: Option<f64>,
    pub profile_path: Option<String>,
    pub cast_id: Option<u32>,
    pub character: Option<String>,
    pub credit_id: Option<String>,
    pub department: Option<String>,
    pub job: Option<String>,
}
