pub mod supabase;
pub mod zoom;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Accept an identifier sent either as a JSON number or a JSON string and
/// normalize it to a string.
pub(crate) fn id_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Null) | None => Ok(None),
        Some(other) => Err(serde::de::Error::custom(format!(
            "unexpected identifier value: {other}"
        ))),
    }
}
