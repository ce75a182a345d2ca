//! Submission normalizer — turns the draft into the payload the backend accepts.
//!
//! Rules, applied in order:
//! 1. pay: empty → null; `$1,200.50`-style input → digits and decimal point only;
//!    anything else → null without rejecting the submission
//! 2. job title: empty → null
//! 3. perks: owned copy of the selection list
//! 4. majors: the one id selected in the majors search box, else [`ValidationIssue::MissingMajor`]
//! 5. location: the one id selected in the location search box, else [`ValidationIssue::MissingLocation`]
//! 6. everything else passes through

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use crate::form::model::FormModel;
use crate::models::SubmissionPayload;

/// "Get currently selected result" of a search widget.
pub trait SelectionProvider {
    fn selected_id(&self) -> Option<i64>;
}

impl SelectionProvider for Option<i64> {
    fn selected_id(&self) -> Option<i64> {
        *self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationIssue {
    #[error("Please enter your major")]
    MissingMajor,

    #[error("Please enter your location")]
    MissingLocation,

    #[error("User must be authenticated")]
    MissingUser,
}

fn pay_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\$?[0-9,]+(\.[0-9]*)?$").expect("pay pattern is valid"))
}

/// `"$1,200.50"` → `Some("1200.50")`; empty or malformed → `None`.
pub fn normalize_pay(raw: &str) -> Option<String> {
    if raw.is_empty() || !pay_pattern().is_match(raw) {
        return None;
    }
    Some(
        raw.chars()
            .filter(|c| c.is_ascii_digit() || *c == '.')
            .collect(),
    )
}

pub fn normalize_job_title(raw: &str) -> Option<String> {
    if raw.is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}

/// Builds a fresh payload from the draft and the two search selections.
///
/// `difficulty_rating` is taken from the draft's difficulty rating.
pub fn normalize(
    form: &FormModel,
    majors: &dyn SelectionProvider,
    locations: &dyn SelectionProvider,
) -> Result<SubmissionPayload, ValidationIssue> {
    let pay = normalize_pay(&form.pay);
    let job_title = normalize_job_title(&form.job_title);
    let perks = form.perks.selected_ids().to_vec();

    let major = majors.selected_id().ok_or(ValidationIssue::MissingMajor)?;
    let location = locations
        .selected_id()
        .ok_or(ValidationIssue::MissingLocation)?;
    let user_id = form.user_id.ok_or(ValidationIssue::MissingUser)?;

    Ok(SubmissionPayload {
        anonymous: form.anonymous,
        return_offer: form.return_offer,
        recommend: form.recommend,
        description: form.description.clone(),
        overall_rating: form.overall_rating,
        culture_rating: form.culture_rating,
        difficulty_rating: form.difficulty_rating,
        pay,
        user_id,
        pay_type_id: form.pay_type_id(),
        job_title,
        perks,
        majors: vec![major],
        location,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Major,
    Location,
    Pay,
}

/// Inline hint for a field that still needs attention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldPrompt {
    pub field: FormField,
    pub prompt: &'static str,
}

/// Advisory field checks shown while the user fills the form. They never block submission.
pub fn field_prompts(
    form: &FormModel,
    majors: &dyn SelectionProvider,
    locations: &dyn SelectionProvider,
) -> Vec<FieldPrompt> {
    let mut prompts = Vec::new();

    if majors.selected_id().is_none() {
        prompts.push(FieldPrompt {
            field: FormField::Major,
            prompt: "Please enter your major",
        });
    }
    if locations.selected_id().is_none() {
        prompts.push(FieldPrompt {
            field: FormField::Location,
            prompt: "Please enter your location",
        });
    }
    if form.pay.trim().chars().count() < 2 {
        prompts.push(FieldPrompt {
            field: FormField::Pay,
            prompt: "Please enter a valid pay",
        });
    }

    prompts
}
