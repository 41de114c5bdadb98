//! The view surface: everything the picker and builder show to the user goes
//! through [`Ui`].

use std::fmt;

use reqwest::Url;

use crate::api::suggest::SuggestMode;
use crate::form::FieldSpec;
use crate::picker::TemplateCard;

pub mod terminal;

/// A surface able to display the picker and builder views.
///
/// Implementations must tolerate `hide_overlay` being called once per
/// `show_overlay`, in order, from the same task.
pub trait Ui: Send + Sync {
    /// Block interaction and display `message` until [`Ui::hide_overlay`].
    fn show_overlay(&self, message: &str);

    fn hide_overlay(&self);

    /// Blocking user notification.
    fn notify(&self, notice: &Notice);

    /// Replace the picker view with one selectable element per card.
    fn render_templates(&self, cards: &[TemplateCard]);

    fn render_form(&self, fields: &[FieldSpec]);

    /// Replace the preview document entirely with `html`.
    fn render_preview(&self, html: &str);

    fn navigate(&self, location: &Url);
}

/// User-facing notifications raised at action boundaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    TemplatesFailed(String),
    MissingRequired(Vec<&'static str>),
    PreviewFailed(String),
    SuggestionEmpty,
    SuggestionFailed(SuggestMode),
    PdfEmpty,
    PdfFailed(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::TemplatesFailed(detail) => write!(f, "Failed to load templates: {detail}"),
            Notice::MissingRequired(fields) => {
                write!(f, "Please fill in the required fields: {}", fields.join(", "))
            }
            Notice::PreviewFailed(detail) => write!(f, "Preview failed: {detail}"),
            Notice::SuggestionEmpty => f.write_str("AI returned an empty response."),
            Notice::SuggestionFailed(SuggestMode::Summary) => {
                f.write_str("AI generation failed. Check server logs.")
            }
            Notice::SuggestionFailed(SuggestMode::Enhance) => {
                f.write_str("AI enhancement failed. Check server logs.")
            }
            Notice::PdfEmpty => f.write_str("PDF generation failed: Empty PDF payload received."),
            Notice::PdfFailed(detail) => write!(f, "PDF generation failed: {detail}"),
        }
    }
}

/// Keeps the overlay up for as long as the guard lives.
///
/// Dropping the guard hides the overlay, so every exit path of an action
/// (success, handled error, early return, unwinding) releases it.
#[must_use = "the overlay is hidden as soon as the guard is dropped"]
pub struct OverlayGuard<'a> {
    ui: &'a dyn Ui,
}

impl<'a> OverlayGuard<'a> {
    pub fn show(ui: &'a dyn Ui, message: &str) -> Self {
        ui.show_overlay(message);
        Self { ui }
    }
}

impl Drop for OverlayGuard<'_> {
    fn drop(&mut self) {
        self.ui.hide_overlay();
    }
}
