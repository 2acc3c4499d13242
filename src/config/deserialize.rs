// ABOUTME: Custom serde deserializers for streamer config fields.
// ABOUTME: Enforces a non-empty keyword list and a positive listener capacity.

use nonempty::NonEmpty;
use serde::Deserialize;

pub fn deserialize_failure_keywords<'de, D>(deserializer: D) -> Result<NonEmpty<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let values: Vec<String> = Vec::deserialize(deserializer)?;
    if let Some(pos) = values.iter().position(|kw| kw.is_empty()) {
        return Err(serde::de::Error::custom(format!(
            "failure keyword at index {pos} is empty"
        )));
    }

    NonEmpty::from_vec(values)
        .ok_or_else(|| serde::de::Error::custom("at least one failure keyword is required"))
}

pub fn deserialize_listener_capacity<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let capacity = usize::deserialize(deserializer)?;
    if capacity == 0 {
        return Err(serde::de::Error::custom(
            "listener_capacity must be at least 1",
        ));
    }
    Ok(capacity)
}
