//! Wire representation of calendar dates (`YYYY-MM-DD`).
//!
//! The API sends an empty string instead of `null` for unknown dates, so both
//! decode to `None`.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serializer, de};

/// Date format used on the wire
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub(crate) mod optional {
    use super::*;

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(date) => serializer.collect_str(&date.format(DATE_FORMAT)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;

        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => NaiveDate::parse_from_str(value, DATE_FORMAT)
                .map(Some)
                .map_err(|e| de::Error::custom(format!("invalid date '{}': {}", value, e))),
        }
    }
}
