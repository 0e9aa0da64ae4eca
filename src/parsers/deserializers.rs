use chrono::{DateTime, FixedOffset};
use serde::de::Error;
use serde::{Deserialize, Deserializer};

/// Deserializer for `published`/`endTime` values.
///
/// Mastodon exports write RFC 3339 with either a `Z` or a numeric offset;
/// the offset is kept as-is so month bucketing happens in the record's own
/// local time.
pub fn deserialize_published<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    DateTime::parse_from_rfc3339(&s)
        .map_err(|e| Error::custom(format!("invalid RFC3339 timestamp {s:?}: {e}")))
}

/// Same as [`deserialize_published`] but tolerates a missing or null field.
pub fn deserialize_opt_published<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<FixedOffset>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    value
        .map(|s| {
            DateTime::parse_from_rfc3339(&s)
                .map_err(|e| Error::custom(format!("invalid RFC3339 timestamp {s:?}: {e}")))
        })
        .transpose()
}
