use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A server-defined resume layout as listed by `GET /api/templates`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    #[serde(deserialize_with = "id_from_number_or_string")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requires_photo: bool,
}

/// Full template body returned by `GET /api/templates/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateDetail {
    #[serde(deserialize_with = "id_from_number_or_string")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub html: String,
    #[serde(default)]
    pub css: String,
}

/// The backend stores template ids as integers but the client treats them as
/// opaque strings, so accept both encodings.
fn id_from_number_or_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "template id must be a string or number, got {other}"
        ))),
    }
}
