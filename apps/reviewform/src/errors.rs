use thiserror::Error;

use crate::api_client::ApiError;
use crate::form::ValidationIssue;
use crate::session::Route;

/// Raised when a form session is opened without a signed-in user.
#[derive(Debug, Error)]
#[error("User must be authenticated; redirecting to {redirect}")]
pub struct AuthRequired {
    pub redirect: Route,
}

/// Why a submit attempt did not produce a review.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("Company record has not been resolved")]
    CompanyUnresolved,

    #[error("User must be authenticated")]
    Unauthenticated,

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationIssue),

    #[error("Submission failed: {message}")]
    Remote {
        message: String,
        #[source]
        source: ApiError,
    },
}

impl SubmitError {
    /// Whether the user can fix the form and press submit again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SubmitError::Validation(_) | SubmitError::Remote { .. })
    }
}
