use async_trait::async_trait;

use crate::api_client::ApiError;
use crate::models::{City, Company, Major, PayType, Perk, ReviewRecord, SubmissionPayload, User};

/// Read and write operations the review form needs from the backend.
///
/// Held as `Arc<dyn ReviewService>` so reference-data fetches can run as
/// independent tasks and tests can swap in an in-memory backend.
#[async_trait]
pub trait ReviewService: Send + Sync {
    /// Company by exact name, with perks, majors, reviews and locations (plus region).
    async fn find_company(&self, name: &str) -> Result<Company, ApiError>;

    async fn list_majors(&self) -> Result<Vec<Major>, ApiError>;

    async fn list_perks(&self) -> Result<Vec<Perk>, ApiError>;

    async fn list_pay_types(&self) -> Result<Vec<PayType>, ApiError>;

    async fn create_review(
        &self,
        company_id: i64,
        payload: &SubmissionPayload,
    ) -> Result<ReviewRecord, ApiError>;

    async fn search_cities(&self, query: &str) -> Result<Vec<City>, ApiError>;
}

/// Session-level authentication collaborator.
#[async_trait]
pub trait Authenticator: Send + Sync {
    fn is_authenticated(&self) -> bool;

    /// Resolves the signed-in account. Deferred: callers receive it after session start.
    async fn current_user(&self) -> Result<User, ApiError>;
}
