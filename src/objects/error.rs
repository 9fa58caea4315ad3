use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Error envelope returned by the API on failed requests.
///
/// The `message` field arrives in several shapes (single string, array,
/// null, or some other scalar/object) and is normalized to a list of
/// strings on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    #[serde(default)]
    pub status_code: u16,
    /// Short error label, e.g. `"Bad Request"`.
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default, rename = "message", deserialize_with = "messages_from_value")]
    pub messages: Vec<String>,
}

fn messages_from_value<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(normalize_messages(value))
}

/// Normalize the heterogeneous `message` shapes into a list of strings:
/// string => singleton, null => empty, array => element-wise stringification
/// (string elements kept verbatim), anything else => singleton of its JSON
/// text.
fn normalize_messages(value: Value) -> Vec<String> {
    match value {
        Value::Null => Vec::new(),
        Value::String(message) => vec![message],
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(message) => message,
                other => other.to_string(),
            })
            .collect(),
        other => vec![other.to_string()],
    }
}
