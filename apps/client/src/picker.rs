//! Template picker: lists the server's templates and navigates to the builder.

use std::sync::Arc;

use reqwest::Url;
use tracing::{error, info};

use crate::api::{builder_location, ResumeApi};
use crate::errors::ApiError;
use crate::models::template::Template;
use crate::ui::{Notice, Ui};

/// One selectable entry in the picker view.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateCard {
    pub template: Template,
    /// Builder location this card navigates to.
    pub target: Url,
}

pub struct TemplatePicker {
    api: Arc<dyn ResumeApi>,
    ui: Arc<dyn Ui>,
    base_url: Url,
    cards: Vec<TemplateCard>,
}

impl TemplatePicker {
    /// `base_url` is the site root the builder location is resolved against.
    pub fn new(api: Arc<dyn ResumeApi>, ui: Arc<dyn Ui>, base_url: Url) -> Self {
        Self {
            api,
            ui,
            base_url,
            cards: Vec::new(),
        }
    }

    /// Fetches the template list once and renders one card per template, in
    /// server order. On failure the user is notified and nothing is rendered.
    pub async fn activate(&mut self) -> &[TemplateCard] {
        self.cards.clear();

        match self.load_cards().await {
            Ok(cards) => {
                info!("Loaded {} templates", cards.len());
                self.ui.render_templates(&cards);
                self.cards = cards;
            }
            Err(e) => {
                error!("Error loading templates: {e}");
                self.ui.notify(&Notice::TemplatesFailed(e.to_string()));
            }
        }

        &self.cards
    }

    pub fn cards(&self) -> &[TemplateCard] {
        &self.cards
    }

    /// Navigates to the builder for the card at `index`.
    /// Returns the location, or `None` if there is no such card.
    pub fn select(&self, index: usize) -> Option<&Url> {
        let card = self.cards.get(index)?;
        info!("Template {} selected", card.template.id);
        self.ui.navigate(&card.target);
        Some(&card.target)
    }

    async fn load_cards(&self) -> Result<Vec<TemplateCard>, ApiError> {
        self.api
            .list_templates()
            .await?
            .into_iter()
            .map(|template| {
                let target = builder_location(&self.base_url, Some(&template.id))?;
                Ok(TemplateCard { template, target })
            })
            .collect()
    }
}
