use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::api_client::{ApiError, Authenticator, ReviewService};
use crate::models::{Company, Major, PayType, Perk, User};

/// Completion of one independent fetch.
#[derive(Debug)]
pub enum ReferenceEvent {
    Company(Result<Company, ApiError>),
    Majors(Result<Vec<Major>, ApiError>),
    Perks(Result<Vec<Perk>, ApiError>),
    PayTypes(Result<Vec<PayType>, ApiError>),
    CurrentUser(Result<User, ApiError>),
}

impl ReferenceEvent {
    pub fn resource(&self) -> &'static str {
        match self {
            ReferenceEvent::Company(_) => "company",
            ReferenceEvent::Majors(_) => "majors",
            ReferenceEvent::Perks(_) => "perks",
            ReferenceEvent::PayTypes(_) => "pay types",
            ReferenceEvent::CurrentUser(_) => "current user",
        }
    }
}

/// Fires the reference-data fetches back to back and yields their results as they land.
///
/// Fetches never wait on each other; each is bounded by `timeout` and fails on its own.
/// Dropping the loader aborts whatever is still in flight.
pub struct ReferenceDataLoader {
    tasks: JoinSet<ReferenceEvent>,
    timeout: Duration,
}

impl ReferenceDataLoader {
    pub fn start(service: Arc<dyn ReviewService>, company_name: &str, timeout: Duration) -> Self {
        let mut tasks = JoinSet::new();

        let svc = service.clone();
        let name = company_name.to_string();
        tasks.spawn(async move {
            ReferenceEvent::Company(bounded("company", timeout, svc.find_company(&name)).await)
        });

        let svc = service.clone();
        tasks.spawn(async move {
            ReferenceEvent::Majors(bounded("majors", timeout, svc.list_majors()).await)
        });

        let svc = service.clone();
        tasks.spawn(async move {
            ReferenceEvent::Perks(bounded("perks", timeout, svc.list_perks()).await)
        });

        let svc = service;
        tasks.spawn(async move {
            ReferenceEvent::PayTypes(bounded("pay types", timeout, svc.list_pay_types()).await)
        });

        debug!("Started reference-data fetches for company '{}'", company_name);
        Self { tasks, timeout }
    }

    /// Adds the deferred current-user lookup to the same completion stream.
    pub fn watch_current_user(&mut self, auth: Arc<dyn Authenticator>) {
        let timeout = self.timeout;
        self.tasks.spawn(async move {
            ReferenceEvent::CurrentUser(bounded("current user", timeout, auth.current_user()).await)
        });
    }

    /// Next completed fetch, in arrival order. `None` once everything has landed.
    pub async fn next_event(&mut self) -> Option<ReferenceEvent> {
        loop {
            match self.tasks.join_next().await? {
                Ok(event) => return Some(event),
                Err(err) => warn!("Reference-data task ended abnormally: {}", err),
            }
        }
    }

    pub fn in_flight(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_finished(&self) -> bool {
        self.tasks.is_empty()
    }
}

async fn bounded<T, F>(resource: &'static str, after: Duration, fetch: F) -> Result<T, ApiError>
where
    F: Future<Output = Result<T, ApiError>>,
{
    match tokio::time::timeout(after, fetch).await {
        Ok(result) => result,
        Err(_) => Err(ApiError::Timeout { resource, after }),
    }
}
