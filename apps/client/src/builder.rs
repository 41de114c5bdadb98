//! Resume builder: the form plus the five user actions.
//!
//! Each action is one request/response cycle. Errors stop at the action
//! boundary: they are logged, turned into a [`Notice`], and reported back as
//! an outcome value instead of propagating.

use std::path::PathBuf;
use std::sync::Arc;

use reqwest::Url;
use tracing::{error, info, warn};

use crate::api::suggest::{extract_suggestion, SuggestMode, SuggestRequest};
use crate::api::ResumeApi;
use crate::download::{pdf_filename, DownloadSink};
use crate::errors::{ActionError, ApiError};
use crate::form::{Action, ActionBindings, FormState, FORM_FIELDS};
use crate::models::resume::ResumeRecord;
use crate::state::Session;
use crate::ui::{Notice, OverlayGuard, Ui};

const PDF_PROGRESS: &str = "Generating your PDF...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestOutcome {
    /// The summary field now holds this text.
    Applied(String),
    Empty,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    Saved(PathBuf),
    EmptyPayload,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Previewed,
    PreviewFailed,
    MissingRequired(Vec<&'static str>),
    Suggested(SuggestOutcome),
    Downloaded(DownloadOutcome),
    /// The builder has not been activated, so the action is not wired up.
    Unbound,
}

pub struct ResumeBuilder {
    api: Arc<dyn ResumeApi>,
    ui: Arc<dyn Ui>,
    downloads: Arc<dyn DownloadSink>,
    form: FormState,
    bindings: ActionBindings,
    session: Session,
}

impl ResumeBuilder {
    pub fn new(api: Arc<dyn ResumeApi>, ui: Arc<dyn Ui>, downloads: Arc<dyn DownloadSink>) -> Self {
        Self {
            api,
            ui,
            downloads,
            form: FormState::new(),
            bindings: ActionBindings::default(),
            session: Session::default(),
        }
    }

    /// Renders the form, binds the actions and reads the template id from
    /// `location`. Safe to call repeatedly; actions are only bound once.
    pub fn activate(&mut self, location: Option<&Url>) {
        self.ui.render_form(&FORM_FIELDS);
        let newly_bound = self.bindings.bind_all();
        self.session = Session::from_location(location);
        info!(
            template_id = ?self.session.template_id,
            newly_bound,
            "Builder activated"
        );
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    pub fn template_id(&self) -> Option<&str> {
        self.session.template_id.as_deref()
    }

    /// Record sent with the most recent preview.
    pub fn last_record(&self) -> Option<&ResumeRecord> {
        self.session.last_record.as_ref()
    }

    /// Runs a bound action. `Preview` checks required fields first, the way a
    /// form submit would; every other path goes straight to its handler.
    pub async fn dispatch(&mut self, action: Action) -> ActionOutcome {
        if !self.bindings.is_bound(action) {
            warn!("Action {action:?} dispatched before the builder was activated");
            return ActionOutcome::Unbound;
        }

        match action {
            Action::SampleData => self.fill_sample_data().await,
            Action::Preview => {
                let missing = self.form.missing_required();
                if !missing.is_empty() {
                    self.ui.notify(&Notice::MissingRequired(missing.clone()));
                    return ActionOutcome::MissingRequired(missing);
                }
                self.run_preview().await
            }
            Action::GenerateSummary => ActionOutcome::Suggested(self.generate_summary().await),
            Action::EnhanceSummary => ActionOutcome::Suggested(self.enhance_summary().await),
            Action::DownloadPdf => ActionOutcome::Downloaded(self.download_pdf().await),
        }
    }

    /// Writes the placeholder values into every field and previews once.
    pub async fn fill_sample_data(&mut self) -> ActionOutcome {
        self.form.fill_sample();
        info!("Sample data filled");
        self.run_preview().await
    }

    /// Sends the current form to `/preview` and replaces the preview surface
    /// with the returned document. Errors are returned, not reported.
    pub async fn preview(&mut self) -> Result<(), ApiError> {
        let record = self.form.read_record();
        let html = self
            .api
            .render_preview(self.session.template_id.as_deref(), &record)
            .await?;
        self.session.last_record = Some(record);
        self.ui.render_preview(&html);
        Ok(())
    }

    /// [`ResumeBuilder::preview`] with failures logged and shown to the user.
    pub async fn run_preview(&mut self) -> ActionOutcome {
        match self.preview().await {
            Ok(()) => ActionOutcome::Previewed,
            Err(e) => {
                error!("Preview failed: {e}");
                self.ui.notify(&Notice::PreviewFailed(e.to_string()));
                ActionOutcome::PreviewFailed
            }
        }
    }

    pub async fn generate_summary(&mut self) -> SuggestOutcome {
        self.suggest(SuggestMode::Summary).await
    }

    pub async fn enhance_summary(&mut self) -> SuggestOutcome {
        self.suggest(SuggestMode::Enhance).await
    }

    async fn suggest(&mut self, mode: SuggestMode) -> SuggestOutcome {
        let record = self.form.read_record();
        let template_id = self.session.template_id.clone();
        info!(mode = mode.as_str(), "AI suggestion requested");

        let response = {
            let _overlay = OverlayGuard::show(self.ui.as_ref(), mode.progress_message());
            let request = SuggestRequest {
                template_id: template_id.as_deref(),
                data: &record,
                mode,
            };
            self.api.suggest(&request).await
        };

        let body = match response {
            Ok(body) => body,
            Err(e) => {
                error!(mode = mode.as_str(), "AI suggestion failed: {e}");
                self.ui.notify(&Notice::SuggestionFailed(mode));
                return SuggestOutcome::Failed;
            }
        };

        let Some(text) = extract_suggestion(&body) else {
            warn!(mode = mode.as_str(), "AI returned an empty response");
            self.ui.notify(&Notice::SuggestionEmpty);
            return SuggestOutcome::Empty;
        };

        self.form.set("summary", text.clone());
        info!(mode = mode.as_str(), "Summary updated from AI suggestion");
        self.run_preview().await;
        SuggestOutcome::Applied(text)
    }

    /// Generates the PDF and hands it to the download sink as
    /// `Resume_<template_id>.pdf`.
    pub async fn download_pdf(&mut self) -> DownloadOutcome {
        let record = self.form.read_record();
        let template_id = self.session.template_id.clone();
        info!("PDF download requested");

        let result = {
            let _overlay = OverlayGuard::show(self.ui.as_ref(), PDF_PROGRESS);
            self.fetch_and_deliver(template_id.as_deref(), &record).await
        };

        match result {
            Ok(path) => {
                info!("PDF downloaded to {}", path.display());
                DownloadOutcome::Saved(path)
            }
            Err(ActionError::EmptyPayload) => {
                error!("PDF generation error: empty payload");
                self.ui.notify(&Notice::PdfEmpty);
                DownloadOutcome::EmptyPayload
            }
            Err(e) => {
                error!("PDF generation error: {e}");
                self.ui.notify(&Notice::PdfFailed(e.to_string()));
                DownloadOutcome::Failed
            }
        }
    }

    async fn fetch_and_deliver(
        &self,
        template_id: Option<&str>,
        record: &ResumeRecord,
    ) -> Result<PathBuf, ActionError> {
        let payload = self.api.generate_pdf(template_id, record).await?;
        if payload.is_empty() {
            return Err(ActionError::EmptyPayload);
        }
        let path = self
            .downloads
            .deliver(&pdf_filename(template_id), &payload)?;
        Ok(path)
    }
}
