use chrono::NaiveDate;
use serde::{Serialize, Deserialize};

/// Wire format of the `birthDate` field.
pub const BIRTH_DATE_FORMAT: &str = "%d-%m-%Y";

/// A row from the players table.
///
/// `id` is assigned by the database and stays absent until the row has been
/// persisted. The other fields mirror what a client may send: `name`,
/// `nationality` and `birthDate` are nullable, and `titles` falls back to 0
/// when omitted, so a PUT body with missing fields replaces them with their
/// defaults instead of merging.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default, with = "birth_date_format")]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub titles: i64,
}

/// Serde codec for the `dd-MM-yyyy` birth date representation.
pub mod birth_date_format {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::BIRTH_DATE_FORMAT;

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(date) => serializer.serialize_str(&date.format(BIRTH_DATE_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|value| {
                NaiveDate::parse_from_str(&value, BIRTH_DATE_FORMAT)
                    .map_err(serde::de::Error::custom)
            })
            .transpose()
    }
}
