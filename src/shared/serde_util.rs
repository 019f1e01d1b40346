//! Custom serde helpers for node and matcher wire formats.

/// Deserializes a Unix-millis integer into `DateTime<Utc>`.
///
/// The matcher sends order timestamps as epoch milliseconds.
pub mod timestamp_ms {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = i64::deserialize(deserializer)?;
        DateTime::<Utc>::from_timestamp_millis(millis)
            .ok_or_else(|| serde::de::Error::custom(format!("Invalid timestamp: {}", millis)))
    }
}

/// Deserializes a minor-unit amount sent either as a JSON number or, when the
/// node runs with `large-significand-format=string`, as a decimal string.
pub mod minor_units {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(i64),
        Text(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<i128, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(n as i128),
            Raw::Text(s) => s
                .parse::<i128>()
                .map_err(|e| serde::de::Error::custom(format!("Invalid amount '{}': {}", s, e))),
        }
    }
}
