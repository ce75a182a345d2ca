use async_trait::async_trait;
use tracing::debug;

use crate::api_client::{ApiClient, ApiError, Authenticator};
use crate::models::User;

/// Authenticator backed by a pre-issued access token and the id of the account it belongs to.
#[derive(Clone)]
pub struct TokenAuthenticator {
    client: ApiClient,
    user_id: Option<i64>,
}

impl TokenAuthenticator {
    pub fn new(client: ApiClient, user_id: Option<i64>) -> Self {
        Self { client, user_id }
    }
}

#[async_trait]
impl Authenticator for TokenAuthenticator {
    fn is_authenticated(&self) -> bool {
        self.client.access_token().is_some() && self.user_id.is_some()
    }

    async fn current_user(&self) -> Result<User, ApiError> {
        let user_id = self.user_id.ok_or(ApiError::MissingCredentials)?;
        if self.client.access_token().is_none() {
            return Err(ApiError::MissingCredentials);
        }
        debug!("Resolving current user {}", user_id);
        self.client.fetch_user(user_id).await
    }
}
