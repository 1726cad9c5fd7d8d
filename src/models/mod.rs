// Backend-owned records, consumed as plain serde structs.
// Each domain has `types.rs` (records and payloads) and `api.rs` (backend calls).

pub mod employee;
pub mod meeting;
pub mod task;

use serde::{Deserialize, Deserializer};

/// Deserialize a string field that the backend may send as `null`.
pub(crate) fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserialize an id that may arrive as a string or a number.
pub(crate) fn flexible_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => s,
        Some(serde_json::Value::Number(n)) => n.to_string(),
        _ => String::new(),
    })
}
