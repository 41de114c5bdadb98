//! Shared fixtures: an axum stand-in for the resume server and a `Ui` that
//! records every call.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::{Multipart, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use reqwest::Url;
use serde_json::Value;

use resume_client::form::FieldSpec;
use resume_client::picker::TemplateCard;
use resume_client::ui::{Notice, Ui};

/// A canned HTTP answer.
#[derive(Clone)]
pub struct Canned {
    pub status: StatusCode,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl Canned {
    pub fn json(value: Value) -> Self {
        Self {
            status: StatusCode::OK,
            content_type: "application/json",
            body: value.to_string().into_bytes(),
        }
    }

    pub fn text(body: &str) -> Self {
        Self {
            status: StatusCode::OK,
            content_type: "text/plain; charset=utf-8",
            body: body.as_bytes().to_vec(),
        }
    }

    pub fn pdf(body: &[u8]) -> Self {
        Self {
            status: StatusCode::OK,
            content_type: "application/pdf",
            body: body.to_vec(),
        }
    }

    pub fn error(status: u16, body: &str) -> Self {
        Self {
            status: StatusCode::from_u16(status).unwrap(),
            content_type: "text/plain; charset=utf-8",
            body: body.as_bytes().to_vec(),
        }
    }
}

impl IntoResponse for Canned {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, self.content_type)],
            self.body,
        )
            .into_response()
    }
}

/// Requests the stub received, in arrival order per endpoint.
#[derive(Default)]
pub struct Received {
    pub template_lists: usize,
    /// (template_id, data_json) multipart fields.
    pub previews: Vec<(String, Value)>,
    pub suggestions: Vec<Value>,
    pub generations: Vec<Value>,
}

#[derive(Clone)]
pub struct StubState {
    pub templates: Canned,
    pub preview: Canned,
    pub suggest: Canned,
    pub generate: Canned,
    pub received: Arc<Mutex<Received>>,
}

impl Default for StubState {
    fn default() -> Self {
        Self {
            templates: Canned::json(serde_json::json!([])),
            preview: Canned::text("<html>preview</html>"),
            suggest: Canned::json(serde_json::json!({"text": ""})),
            generate: Canned::pdf(b"%PDF-1.4"),
            received: Arc::default(),
        }
    }
}

async fn list_templates(State(state): State<StubState>) -> Canned {
    state.received.lock().unwrap().template_lists += 1;
    state.templates
}

async fn preview(State(state): State<StubState>, mut multipart: Multipart) -> Canned {
    let mut template_id = String::new();
    let mut data = Value::Null;
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        let text = field.text().await.unwrap();
        match name.as_str() {
            "template_id" => template_id = text,
            "data_json" => data = serde_json::from_str(&text).unwrap(),
            _ => {}
        }
    }
    state.received.lock().unwrap().previews.push((template_id, data));
    state.preview
}

async fn suggest(State(state): State<StubState>, Json(body): Json<Value>) -> Canned {
    state.received.lock().unwrap().suggestions.push(body);
    state.suggest
}

async fn generate(State(state): State<StubState>, body: Bytes) -> Canned {
    let body: Value = serde_json::from_slice(&body).unwrap();
    state.received.lock().unwrap().generations.push(body);
    state.generate
}

async fn template_detail() -> Canned {
    Canned::json(serde_json::json!({
        "id": 1,
        "name": "Classic",
        "description": "Single column",
        "html": "<h1>{{ name }}</h1>",
        "css": "h1 { color: navy; }"
    }))
}

async fn health() -> Canned {
    Canned::json(serde_json::json!({"status": "ok"}))
}

/// Serves `state` on an ephemeral port and returns the base URL.
pub async fn spawn_stub(state: StubState) -> Url {
    let app = Router::new()
        .route("/api/templates", get(list_templates))
        .route("/api/templates/:id", get(template_detail))
        .route("/preview", post(preview))
        .route("/suggest", post(suggest))
        .route("/generate", post(generate))
        .route("/health", get(health))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    Url::parse(&format!("http://{addr}/")).unwrap()
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Show(String),
    Hide,
    Notice(Notice),
    Templates(Vec<TemplateCard>),
    Form(usize),
    Preview(String),
    Navigate(Url),
}

#[derive(Default)]
pub struct RecordingUi {
    pub events: Mutex<Vec<UiEvent>>,
}

impl RecordingUi {
    pub fn events(&self) -> Vec<UiEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                UiEvent::Notice(n) => Some(n),
                _ => None,
            })
            .collect()
    }

    pub fn previews(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                UiEvent::Preview(html) => Some(html),
                _ => None,
            })
            .collect()
    }

    /// Shows and hides alternate and end hidden.
    pub fn overlay_balanced(&self) -> bool {
        let mut depth = 0i32;
        for event in self.events() {
            match event {
                UiEvent::Show(_) => depth += 1,
                UiEvent::Hide => depth -= 1,
                _ => {}
            }
            if !(0..=1).contains(&depth) {
                return false;
            }
        }
        depth == 0
    }

    fn push(&self, event: UiEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl Ui for RecordingUi {
    fn show_overlay(&self, message: &str) {
        self.push(UiEvent::Show(message.to_string()));
    }

    fn hide_overlay(&self) {
        self.push(UiEvent::Hide);
    }

    fn notify(&self, notice: &Notice) {
        self.push(UiEvent::Notice(notice.clone()));
    }

    fn render_templates(&self, cards: &[TemplateCard]) {
        self.push(UiEvent::Templates(cards.to_vec()));
    }

    fn render_form(&self, fields: &[FieldSpec]) {
        self.push(UiEvent::Form(fields.len()));
    }

    fn render_preview(&self, html: &str) {
        self.push(UiEvent::Preview(html.to_string()));
    }

    fn navigate(&self, location: &Url) {
        self.push(UiEvent::Navigate(location.clone()));
    }
}
