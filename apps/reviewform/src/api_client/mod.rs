/// API client — the only module that speaks HTTP to the review backend.
///
/// The backend is a LoopBack REST API: models are addressed as
/// `/Companies`, `/Majors`, `/Perks`, `/PayTypes`, `/Users`, and error bodies
/// have the shape `{ "error": { "message": ... } }`.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{City, Company, Major, PayType, Perk, ReviewRecord, SubmissionPayload, User};

pub mod auth;
pub mod service;

pub use auth::TokenAuthenticator;
pub use service::{Authenticator, ReviewService};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {}", .message.as_deref().unwrap_or("no message"))]
    Api { status: u16, message: Option<String> },

    #[error("{resource} request timed out after {}s", .after.as_secs())]
    Timeout {
        resource: &'static str,
        after: Duration,
    },

    #[error("No access token or user id configured")]
    MissingCredentials,
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            ApiError::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Human-readable message supplied by the server, if it sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Api { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct LoopBackError {
    error: LoopBackErrorBody,
}

#[derive(Debug, Deserialize)]
struct LoopBackErrorBody {
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CitySearchResponse {
    #[serde(default)]
    results: Vec<City>,
}

/// `findOne` filter selecting a company by name with everything the review form shows.
pub fn company_filter(name: &str) -> Value {
    json!({
        "where": { "name": name },
        "include": ["perks", "majors", "reviews", { "locations": "region" }]
    })
}

/// reqwest-backed implementation of [`ReviewService`].
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    access_token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, access_token: Option<String>, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client"),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.access_token {
            Some(token) => request.header("Authorization", token),
            None => request,
        }
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        debug!("GET {}", path);
        let response = self
            .authorize(self.client.get(self.url(path)))
            .query(query)
            .send()
            .await?;
        decode(response).await
    }

    pub(crate) async fn fetch_user(&self, user_id: i64) -> Result<User, ApiError> {
        self.get_json(&format!("Users/{user_id}"), &[]).await
    }
}

/// Turns a response into `T`, or into an [`ApiError::Api`] carrying the server's message.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<LoopBackError>(&body)
        .ok()
        .and_then(|e| e.error.message);
    warn!("API returned {}: {}", status, body);

    Err(ApiError::Api {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl ReviewService for ApiClient {
    async fn find_company(&self, name: &str) -> Result<Company, ApiError> {
        let filter = company_filter(name).to_string();
        self.get_json("Companies/findOne", &[("filter", filter)])
            .await
    }

    async fn list_majors(&self) -> Result<Vec<Major>, ApiError> {
        self.get_json("Majors", &[]).await
    }

    async fn list_perks(&self) -> Result<Vec<Perk>, ApiError> {
        self.get_json("Perks", &[]).await
    }

    async fn list_pay_types(&self) -> Result<Vec<PayType>, ApiError> {
        self.get_json("PayTypes", &[]).await
    }

    async fn create_review(
        &self,
        company_id: i64,
        payload: &SubmissionPayload,
    ) -> Result<ReviewRecord, ApiError> {
        let path = format!("Companies/{company_id}/reviews");
        debug!("POST {}", path);
        let response = self
            .authorize(self.client.post(self.url(&path)))
            .json(payload)
            .send()
            .await?;
        decode(response).await
    }

    async fn search_cities(&self, query: &str) -> Result<Vec<City>, ApiError> {
        let response: CitySearchResponse = self
            .get_json("v1/Cities/search", &[("query", query.to_string())])
            .await?;
        Ok(response.results)
    }
}
