//! Resume server client. The single point of entry for every HTTP call the
//! picker and builder make.
//!
//! No retries and no client-side timeout: a failure surfaces as soon as the
//! transport reports it or the server answers with a non-2xx status.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::{multipart, Client, Response, Url};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::errors::ApiError;
use crate::models::resume::ResumeRecord;
use crate::models::template::{Template, TemplateDetail};

pub mod suggest;

use suggest::{ResponseBody, SuggestRequest};

const TEMPLATES_PATH: &str = "api/templates";
const PREVIEW_PATH: &str = "preview";
const SUGGEST_PATH: &str = "suggest";
const GENERATE_PATH: &str = "generate";
const HEALTH_PATH: &str = "health";
const BUILDER_PATH: &str = "builder.html";

/// The four calls the picker and builder depend on.
///
/// `ApiClient` is the HTTP implementation; builders hold an `Arc<dyn ResumeApi>`
/// so the transport can be swapped without touching action code.
#[async_trait]
pub trait ResumeApi: Send + Sync {
    async fn list_templates(&self) -> Result<Vec<Template>, ApiError>;

    async fn render_preview(
        &self,
        template_id: Option<&str>,
        record: &ResumeRecord,
    ) -> Result<String, ApiError>;

    async fn suggest(&self, request: &SuggestRequest<'_>) -> Result<ResponseBody, ApiError>;

    async fn generate_pdf(
        &self,
        template_id: Option<&str>,
        record: &ResumeRecord,
    ) -> Result<Bytes, ApiError>;
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    template_id: Option<&'a str>,
    #[serde(rename = "formData")]
    form_data: &'a ResumeRecord,
}

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Builds a client rooted at `base_url`. A trailing `/` is appended when
    /// missing so endpoints resolve beneath any path prefix.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Ok(Self {
            client: Client::builder().build()?,
            base_url: normalize_base(base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn builder_location(&self, template_id: Option<&str>) -> Result<Url, ApiError> {
        builder_location(&self.base_url, template_id)
    }

    /// GET /api/templates/{id}
    pub async fn template_detail(&self, template_id: &str) -> Result<TemplateDetail, ApiError> {
        let url = self.endpoint(&format!("{TEMPLATES_PATH}/{template_id}"))?;
        let response = check_status(self.client.get(url).send().await?).await?;
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// GET /health
    pub async fn health(&self) -> Result<Value, ApiError> {
        let response = check_status(self.client.get(self.endpoint(HEALTH_PATH)?).send().await?)
            .await?;
        match read_body(response).await? {
            ResponseBody::Json(value) => Ok(value),
            ResponseBody::Text(text) => Ok(Value::String(text)),
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::InvalidUrl(format!("{path}: {e}")))
    }
}

#[async_trait]
impl ResumeApi for ApiClient {
    /// GET /api/templates
    async fn list_templates(&self) -> Result<Vec<Template>, ApiError> {
        let url = self.endpoint(TEMPLATES_PATH)?;
        let response = check_status(self.client.get(url).send().await?).await?;
        let text = response.text().await?;
        let templates: Vec<Template> = serde_json::from_str(&text)?;
        debug!("Fetched {} templates", templates.len());
        Ok(templates)
    }

    /// POST /preview as multipart form data.
    async fn render_preview(
        &self,
        template_id: Option<&str>,
        record: &ResumeRecord,
    ) -> Result<String, ApiError> {
        let form = multipart::Form::new()
            .text("template_id", template_id.unwrap_or_default().to_string())
            .text("data_json", serde_json::to_string(record)?);

        let response = self
            .client
            .post(self.endpoint(PREVIEW_PATH)?)
            .multipart(form)
            .send()
            .await?;
        let html = check_status(response).await?.text().await?;
        debug!("Preview rendered: {} bytes of HTML", html.len());
        Ok(html)
    }

    /// POST /suggest
    async fn suggest(&self, request: &SuggestRequest<'_>) -> Result<ResponseBody, ApiError> {
        let response = self
            .client
            .post(self.endpoint(SUGGEST_PATH)?)
            .json(request)
            .send()
            .await?;
        read_body(check_status(response).await?).await
    }

    /// POST /generate, returning the raw PDF bytes (possibly empty).
    async fn generate_pdf(
        &self,
        template_id: Option<&str>,
        record: &ResumeRecord,
    ) -> Result<Bytes, ApiError> {
        let body = GenerateRequest {
            template_id,
            form_data: record,
        };
        let response = self
            .client
            .post(self.endpoint(GENERATE_PATH)?)
            .json(&body)
            .send()
            .await?;
        let payload = check_status(response).await?.bytes().await?;
        debug!("PDF payload received: {} bytes", payload.len());
        Ok(payload)
    }
}

/// Location of the builder view for `template_id`, as the picker navigates to it.
pub fn builder_location(base_url: &Url, template_id: Option<&str>) -> Result<Url, ApiError> {
    let mut url = base_url
        .join(BUILDER_PATH)
        .map_err(|e| ApiError::InvalidUrl(format!("{BUILDER_PATH}: {e}")))?;
    if let Some(id) = template_id {
        url.query_pairs_mut().append_pair("template_id", id);
    }
    Ok(url)
}

fn normalize_base(base_url: &str) -> Result<Url, ApiError> {
    let mut url =
        Url::parse(base_url).map_err(|e| ApiError::InvalidUrl(format!("{base_url}: {e}")))?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Turns a non-2xx response into `ApiError::Status`, carrying the body text.
async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Status {
        status: status.as_u16(),
        body,
    })
}

/// Parses the body as JSON only when the server declared it so.
async fn read_body(response: Response) -> Result<ResponseBody, ApiError> {
    let is_json = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains("application/json"));

    let text = response.text().await?;
    if is_json {
        Ok(ResponseBody::Json(serde_json::from_str(&text)?))
    } else {
        Ok(ResponseBody::Text(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_gets_trailing_slash() {
        let url = normalize_base("http://localhost:8000/resume").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/resume/");
        assert_eq!(
            url.join(PREVIEW_PATH).unwrap().as_str(),
            "http://localhost:8000/resume/preview"
        );
    }

    #[test]
    fn test_root_base_unchanged() {
        let url = normalize_base("http://localhost:8000").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/");
    }

    #[test]
    fn test_invalid_base_rejected() {
        assert!(matches!(
            normalize_base("not a url"),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_builder_location_encodes_id() {
        let client = ApiClient::new("http://localhost:8000/").unwrap();
        let url = client.builder_location(Some("a b&c")).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/builder.html?template_id=a+b%26c"
        );
    }

    #[test]
    fn test_builder_location_without_id() {
        let client = ApiClient::new("http://localhost:8000/").unwrap();
        let url = client.builder_location(None).unwrap();
        assert_eq!(url.query(), None);
    }

    #[test]
    fn test_generate_request_uses_form_data_key() {
        let record = ResumeRecord {
            name: "Ada".to_string(),
            ..Default::default()
        };
        let body = GenerateRequest {
            template_id: None,
            form_data: &record,
        };
        let v = serde_json::to_value(&body).unwrap();
        assert!(v["template_id"].is_null());
        assert_eq!(v["formData"]["name"], "Ada");
    }
}
