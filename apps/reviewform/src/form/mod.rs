//! The review draft and everything that operates on it before submission.

pub mod model;
pub mod normalizer;
pub mod perks;
pub mod wizard;

pub use model::{FormModel, DEFAULT_ERROR_MESSAGE};
pub use normalizer::{
    field_prompts, normalize, normalize_job_title, normalize_pay, FieldPrompt, FormField,
    SelectionProvider, ValidationIssue,
};
pub use perks::PerkSelectionSet;
pub use wizard::{WizardController, WizardStep};
