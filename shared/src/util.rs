//! Serde helpers for the loosely-typed backend payloads

use serde::{Deserialize, Deserializer};

/// Accept `0`/`1`, `true`/`false` or `"0"`/`"1"` as an activity flag
pub fn flag<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(u64),
        Bool(bool),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Num(n) => Ok(u8::from(n != 0)),
        Raw::Bool(b) => Ok(u8::from(b)),
        Raw::Text(s) => match s.trim() {
            "1" | "true" => Ok(1),
            "0" | "false" | "" => Ok(0),
            other => Err(serde::de::Error::custom(format!("invalid flag: {other}"))),
        },
    }
}

/// Accept either a JSON string or a JSON number and keep it as text
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(f) => f.to_string(),
    })
}

/// Today's date in local time, `YYYY-MM-DD`
pub fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
