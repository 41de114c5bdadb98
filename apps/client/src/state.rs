use reqwest::Url;

use crate::models::resume::ResumeRecord;

/// Per-activation builder session. Rebuilt on every activation, never persisted.
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// `template_id` query parameter of the builder location, forwarded to the
    /// server as-is (including empty). `None` when the parameter is absent.
    pub template_id: Option<String>,
    /// Snapshot sent with the most recent preview.
    pub last_record: Option<ResumeRecord>,
}

impl Session {
    pub fn from_location(location: Option<&Url>) -> Self {
        Self {
            template_id: location.and_then(template_id_from),
            last_record: None,
        }
    }
}

fn template_id_from(location: &Url) -> Option<String> {
    location
        .query_pairs()
        .find(|(key, _)| key == "template_id")
        .map(|(_, value)| value.into_owned())
}
