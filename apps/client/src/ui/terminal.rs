use std::path::PathBuf;

use reqwest::Url;
use tracing::{debug, error, info};

use crate::form::{FieldKind, FieldSpec};
use crate::picker::TemplateCard;
use crate::ui::{Notice, Ui};

/// Line-oriented `Ui` for the command-line front-end.
///
/// Notices and progress go to stderr, listings to stdout, and the preview
/// document is written to `preview_path`.
#[derive(Debug, Clone)]
pub struct TerminalUi {
    preview_path: PathBuf,
}

impl TerminalUi {
    pub fn new(preview_path: impl Into<PathBuf>) -> Self {
        Self {
            preview_path: preview_path.into(),
        }
    }
}

impl Ui for TerminalUi {
    fn show_overlay(&self, message: &str) {
        eprintln!("... {message}");
    }

    fn hide_overlay(&self) {
        debug!("Overlay hidden");
    }

    fn notify(&self, notice: &Notice) {
        eprintln!("{notice}");
    }

    fn render_templates(&self, cards: &[TemplateCard]) {
        if cards.is_empty() {
            println!("No templates available.");
        }
        for (index, card) in cards.iter().enumerate() {
            let photo = if card.template.requires_photo {
                " [photo]"
            } else {
                ""
            };
            println!(
                "{index:>3}. {} (id {}){photo}\n     {}\n     {}",
                card.template.name, card.template.id, card.template.description, card.target
            );
        }
    }

    fn render_form(&self, fields: &[FieldSpec]) {
        for field in fields {
            let kind = match field.kind {
                FieldKind::Input => "input",
                FieldKind::TextArea => "textarea",
            };
            debug!(
                id = field.id,
                kind,
                required = field.required,
                "Form field: {}",
                field.label
            );
        }
    }

    fn render_preview(&self, html: &str) {
        match std::fs::write(&self.preview_path, html) {
            Ok(()) => info!("Preview written to {}", self.preview_path.display()),
            Err(e) => error!(
                "Failed to write preview to {}: {e}",
                self.preview_path.display()
            ),
        }
    }

    fn navigate(&self, location: &Url) {
        println!("{location}");
    }
}
