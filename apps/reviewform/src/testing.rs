//! In-memory backend and authenticator shared by the unit tests.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::api_client::{ApiError, Authenticator, ReviewService};
use crate::models::{
    City, Company, Location, Major, PayType, Perk, Region, ReviewRecord, SubmissionPayload, User,
};

pub(crate) fn sample_company() -> Company {
    Company {
        id: 3,
        name: "Acme".to_string(),
        perks: Vec::new(),
        majors: Vec::new(),
        reviews: Vec::new(),
        locations: vec![Location {
            id: 5,
            name: "Boston".to_string(),
            region: Some(Region {
                id: 1,
                name: "MA".to_string(),
            }),
        }],
    }
}

pub(crate) fn sample_majors() -> Vec<Major> {
    [(11, "CS", "Computer Science"), (12, "ME", "Mechanical Engineering")]
        .into_iter()
        .map(|(id, code, name)| Major {
            id,
            code: code.to_string(),
            name: name.to_string(),
            title: None,
            description: None,
        })
        .collect()
}

pub(crate) fn sample_perks() -> Vec<Perk> {
    [(1, "Gym"), (2, "Free lunch"), (3, "Housing stipend")]
        .into_iter()
        .map(|(id, name)| Perk {
            id,
            name: name.to_string(),
            is_selected: false,
        })
        .collect()
}

pub(crate) fn sample_cities() -> Vec<City> {
    [(21, "Boston, MA"), (22, "Boulder, CO"), (23, "Austin, TX")]
        .into_iter()
        .map(|(id, title)| City {
            id,
            title: title.to_string(),
            description: None,
        })
        .collect()
}

pub(crate) struct FakeServiceBuilder {
    company: Option<Company>,
    cities: Vec<City>,
    majors_delay: Duration,
    perks_delay: Duration,
    perks_fail: bool,
    reject_with: Option<(u16, Option<String>)>,
}

impl FakeServiceBuilder {
    pub fn company(mut self, company: Company) -> Self {
        self.company = Some(company);
        self
    }

    /// Replaces the cities the city search draws from.
    pub fn cities(mut self, cities: Vec<City>) -> Self {
        self.cities = cities;
        self
    }

    pub fn majors_delay(mut self, delay: Duration) -> Self {
        self.majors_delay = delay;
        self
    }

    pub fn perks_delay(mut self, delay: Duration) -> Self {
        self.perks_delay = delay;
        self
    }

    pub fn perks_fail(mut self) -> Self {
        self.perks_fail = true;
        self
    }

    /// Makes `create_review` answer with this status and optional server message.
    pub fn reject_reviews(mut self, status: u16, message: Option<&str>) -> Self {
        self.reject_with = Some((status, message.map(str::to_string)));
        self
    }

    pub fn build(self) -> FakeService {
        FakeService {
            company: self.company,
            cities: self.cities,
            majors_delay: self.majors_delay,
            perks_delay: self.perks_delay,
            perks_fail: self.perks_fail,
            reject_with: self.reject_with,
            submissions: Mutex::new(Vec::new()),
        }
    }
}

pub(crate) struct FakeService {
    company: Option<Company>,
    cities: Vec<City>,
    majors_delay: Duration,
    perks_delay: Duration,
    perks_fail: bool,
    reject_with: Option<(u16, Option<String>)>,
    submissions: Mutex<Vec<(i64, SubmissionPayload)>>,
}

impl FakeService {
    pub fn builder() -> FakeServiceBuilder {
        FakeServiceBuilder {
            company: None,
            cities: sample_cities(),
            majors_delay: Duration::ZERO,
            perks_delay: Duration::ZERO,
            perks_fail: false,
            reject_with: None,
        }
    }

    pub fn submissions(&self) -> Vec<(i64, SubmissionPayload)> {
        self.submissions.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReviewService for FakeService {
    async fn find_company(&self, name: &str) -> Result<Company, ApiError> {
        match &self.company {
            Some(company) if company.name == name => Ok(company.clone()),
            _ => Err(ApiError::Api {
                status: 404,
                message: Some(format!("Unknown \"Company\" {name}")),
            }),
        }
    }

    async fn list_majors(&self) -> Result<Vec<Major>, ApiError> {
        tokio::time::sleep(self.majors_delay).await;
        Ok(sample_majors())
    }

    async fn list_perks(&self) -> Result<Vec<Perk>, ApiError> {
        tokio::time::sleep(self.perks_delay).await;
        if self.perks_fail {
            return Err(ApiError::Api {
                status: 500,
                message: None,
            });
        }
        Ok(sample_perks())
    }

    async fn list_pay_types(&self) -> Result<Vec<PayType>, ApiError> {
        Ok(vec![PayType {
            id: 1,
            name: "Hourly".to_string(),
        }])
    }

    async fn create_review(
        &self,
        company_id: i64,
        payload: &SubmissionPayload,
    ) -> Result<ReviewRecord, ApiError> {
        self.submissions
            .lock()
            .unwrap()
            .push((company_id, payload.clone()));

        if let Some((status, message)) = &self.reject_with {
            return Err(ApiError::Api {
                status: *status,
                message: message.clone(),
            });
        }

        Ok(ReviewRecord {
            id: 100,
            company_id: Some(company_id),
            overall_rating: Some(payload.overall_rating),
            ..ReviewRecord::default()
        })
    }

    async fn search_cities(&self, query: &str) -> Result<Vec<City>, ApiError> {
        let query = query.to_lowercase();
        Ok(self
            .cities
            .iter()
            .cloned()
            .filter(|city| city.title.to_lowercase().contains(&query))
            .collect())
    }
}

pub(crate) struct FakeAuth {
    user_id: Option<i64>,
}

impl FakeAuth {
    pub fn signed_in(user_id: i64) -> Self {
        Self {
            user_id: Some(user_id),
        }
    }

    pub fn signed_out() -> Self {
        Self { user_id: None }
    }
}

#[async_trait]
impl Authenticator for FakeAuth {
    fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }

    async fn current_user(&self) -> Result<User, ApiError> {
        let id = self.user_id.ok_or(ApiError::MissingCredentials)?;
        Ok(User {
            id,
            email: None,
            username: None,
        })
    }
}
