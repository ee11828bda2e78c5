//! Serde helpers that encode a [`chrono::Duration`] as whole seconds.

use chrono::Duration;
use serde::{Deserialize, Deserializer, Serializer, de::Error};

pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_i64(duration.num_seconds())
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let seconds = i64::deserialize(deserializer)?;
    Duration::try_seconds(seconds)
        .ok_or_else(|| D::Error::custom(format!("duration out of range: {} seconds", seconds)))
}
