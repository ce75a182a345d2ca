//! Scripted stand-in for the form UI: replays a JSON description of a review through the
//! same setters, pickers and wizard steps a user would touch.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::api_client::ApiError;
use crate::form::WizardStep;
use crate::session::ReviewSession;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReviewDraft {
    /// Query typed into the majors search box; the first hit is selected.
    pub major: String,
    /// Query sent to the city search; the first hit is selected.
    pub location: String,
    pub job_title: String,

    pub overall_rating: u8,
    pub culture_rating: u8,
    pub difficulty_rating: u8,
    pub perks: Vec<i64>,
    pub description: String,

    pub pay: String,
    pub pay_type_id: Option<i64>,
    pub anonymous: bool,
    pub return_offer: bool,
    pub recommend: bool,
}

impl Default for ReviewDraft {
    fn default() -> Self {
        Self {
            major: String::new(),
            location: String::new(),
            job_title: String::new(),
            overall_rating: 0,
            culture_rating: 0,
            difficulty_rating: 0,
            perks: Vec::new(),
            description: String::new(),
            pay: String::new(),
            pay_type_id: None,
            anonymous: true,
            return_offer: false,
            recommend: false,
        }
    }
}

#[derive(Debug, Error)]
pub enum DraftError {
    #[error("No major matches '{0}'")]
    NoMajorMatch(String),

    #[error("No city matches '{0}'")]
    NoLocationMatch(String),

    #[error("Perk {0} is not in the catalogue")]
    UnknownPerk(i64),

    #[error("Pay type {0} is not offered")]
    UnknownPayType(i64),

    #[error("City search failed: {0}")]
    LocationSearch(#[from] ApiError),
}

impl ReviewDraft {
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read draft file '{}'", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Draft file '{}' is not a valid review draft", path.display()))
    }

    /// Walks the three wizard steps, leaving the session on the final step ready to submit.
    pub async fn fill(&self, session: &mut ReviewSession) -> Result<(), DraftError> {
        session.wizard_mut().go_to(WizardStep::Step1);
        let major_id = session
            .majors()
            .search(&self.major)
            .first()
            .map(|major| major.id)
            .ok_or_else(|| DraftError::NoMajorMatch(self.major.clone()))?;
        session.majors_mut().select(major_id);

        let city_id = session
            .search_locations(&self.location)
            .await?
            .first()
            .map(|city| city.id)
            .ok_or_else(|| DraftError::NoLocationMatch(self.location.clone()))?;
        session.locations_mut().select(city_id);
        session.form_mut().set_job_title(self.job_title.clone());

        session.wizard_mut().next();
        let form = session.form_mut();
        form.set_ratings([
            self.overall_rating,
            self.culture_rating,
            self.difficulty_rating,
        ]);
        for perk_id in &self.perks {
            if !form.perks.is_selected(*perk_id) {
                form.toggle_perk(*perk_id)
                    .ok_or(DraftError::UnknownPerk(*perk_id))?;
            }
        }
        form.set_description(self.description.clone());

        session.wizard_mut().next();
        if let Some(pay_type_id) = self.pay_type_id {
            let pay_type = session
                .reference()
                .pay_types
                .iter()
                .find(|p| p.id == pay_type_id)
                .cloned()
                .ok_or(DraftError::UnknownPayType(pay_type_id))?;
            session.form_mut().set_pay_type(&pay_type);
        }

        let form = session.form_mut();
        form.set_pay(self.pay.clone());
        if form.anonymous != self.anonymous {
            form.toggle_anonymous();
        }
        if form.return_offer != self.return_offer {
            form.toggle_return_offer();
        }
        if form.recommend != self.recommend {
            form.toggle_recommend();
        }

        debug!("Draft applied; wizard on {:?}", session.wizard().current());
        Ok(())
    }
}
