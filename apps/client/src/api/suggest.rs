//! `/suggest` request shape and response interpretation.

use serde::Serialize;
use serde_json::Value;

use crate::models::resume::ResumeRecord;

/// Field names probed, in priority order, when `/suggest` answers with a JSON object.
pub const SUGGESTION_FIELDS: [&str; 3] = ["text", "summary", "message"];

/// Discriminator telling the server whether to draft a new summary or revise the existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestMode {
    Summary,
    Enhance,
}

impl SuggestMode {
    pub fn progress_message(self) -> &'static str {
        match self {
            SuggestMode::Summary => "Generating your summary with AI...",
            SuggestMode::Enhance => "Enhancing your summary with AI...",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SuggestMode::Summary => "summary",
            SuggestMode::Enhance => "enhance",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SuggestRequest<'a> {
    pub template_id: Option<&'a str>,
    pub data: &'a ResumeRecord,
    pub mode: SuggestMode,
}

/// A response body after content negotiation.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// `Content-Type` declared JSON.
    Json(Value),
    Text(String),
}

/// Pulls usable summary text out of a `/suggest` response.
///
/// Plain text (or a bare JSON string) is taken verbatim. A JSON object yields
/// the first non-empty string among [`SUGGESTION_FIELDS`]. The result is
/// trimmed; `None` means the server produced nothing usable.
pub fn extract_suggestion(body: &ResponseBody) -> Option<String> {
    let raw = match body {
        ResponseBody::Text(text) => Some(text.as_str()),
        ResponseBody::Json(Value::String(text)) => Some(text.as_str()),
        ResponseBody::Json(Value::Object(map)) => SUGGESTION_FIELDS
            .iter()
            .filter_map(|key| map.get(*key).and_then(Value::as_str))
            .find(|s| !s.is_empty()),
        ResponseBody::Json(_) => None,
    }?;

    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
