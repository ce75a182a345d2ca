//! Review session — owns one form draft from page entry until navigation away.
//!
//! Reference-data completions, widget callbacks and the submit action all mutate the
//! session through `&mut self`, so a second submit cannot start while one is pending.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::api_client::{ApiError, Authenticator, ReviewService};
use crate::errors::{AuthRequired, SubmitError};
use crate::form::{
    field_prompts, normalize, FieldPrompt, FormModel, WizardController, DEFAULT_ERROR_MESSAGE,
};
use crate::models::{City, Company, Major};
use crate::reference::{
    LoadState, LoadingFlags, ReferenceData, ReferenceDataLoader, ReferenceEvent,
};
use crate::search::{location_search, major_search, SearchBox};
use crate::session::Route;

pub struct ReviewSession {
    company_name: String,
    service: Arc<dyn ReviewService>,
    loader: ReferenceDataLoader,
    reference: ReferenceData,
    loading: LoadingFlags,
    form: FormModel,
    wizard: WizardController,
    majors: SearchBox<Major>,
    locations: SearchBox<City>,
    pending_route: Option<Route>,
    next_after_login: Option<Route>,
}

impl ReviewSession {
    /// Enters `/company/{name}/review`. Fails with a login redirect when nobody is signed in;
    /// otherwise every reference fetch and the current-user lookup are already in flight.
    pub fn open(
        service: Arc<dyn ReviewService>,
        auth: Arc<dyn Authenticator>,
        company_name: &str,
        reference_timeout: Duration,
    ) -> Result<Self, AuthRequired> {
        if !auth.is_authenticated() {
            warn!("Review form opened without an authenticated user");
            return Err(AuthRequired {
                redirect: Route::Login,
            });
        }

        let mut loader =
            ReferenceDataLoader::start(service.clone(), company_name, reference_timeout);
        loader.watch_current_user(auth);

        let reference = ReferenceData::default();
        let form = FormModel::new(&reference.pay_types);

        info!("Opened review form for company '{}'", company_name);

        Ok(Self {
            company_name: company_name.to_string(),
            service,
            loader,
            reference,
            loading: LoadingFlags::default(),
            form,
            wizard: WizardController::default(),
            majors: major_search(),
            locations: location_search(),
            pending_route: None,
            next_after_login: None,
        })
    }

    /// Waits for the next reference fetch to land and applies it. False once nothing is left.
    pub async fn next_reference_event(&mut self) -> bool {
        match self.loader.next_event().await {
            Some(event) => {
                self.apply(event);
                true
            }
            None => false,
        }
    }

    /// Applies every outstanding reference fetch.
    pub async fn finish_loading(&mut self) {
        while self.next_reference_event().await {}
    }

    /// Folds one fetch result into the session.
    pub fn apply(&mut self, event: ReferenceEvent) {
        let resource = event.resource();
        match event {
            ReferenceEvent::Company(Ok(company)) => {
                info!("Resolved company '{}' (id {})", company.name, company.id);
                self.reference.company = Some(company);
                self.reference.status.company = LoadState::Ready;
                self.loading.main = false;
            }
            ReferenceEvent::Company(Err(err)) => {
                self.reference.status.company = failed(resource, &err);
                self.loading.main = false;
            }
            ReferenceEvent::Majors(Ok(mut majors)) => {
                for major in &mut majors {
                    major.annotate();
                }
                debug!("Loaded {} majors into the search index", majors.len());
                self.majors.set_source(majors);
                self.reference.status.majors = LoadState::Ready;
            }
            ReferenceEvent::Majors(Err(err)) => {
                self.reference.status.majors = failed(resource, &err);
            }
            ReferenceEvent::Perks(Ok(perks)) => {
                debug!("Loaded {} perks", perks.len());
                self.form.perks.load(perks);
                self.reference.status.perks = LoadState::Ready;
                self.loading.perks = false;
            }
            ReferenceEvent::Perks(Err(err)) => {
                self.reference.status.perks = failed(resource, &err);
                self.loading.perks = false;
            }
            ReferenceEvent::PayTypes(Ok(pay_types)) => {
                debug!("Fetched {} pay types", pay_types.len());
                self.reference.fetched_pay_types = pay_types;
                self.reference.status.pay_types = LoadState::Ready;
            }
            ReferenceEvent::PayTypes(Err(err)) => {
                self.reference.status.pay_types = failed(resource, &err);
            }
            ReferenceEvent::CurrentUser(Ok(user)) => {
                debug!("Current user resolved as {}", user.id);
                self.form.set_user_id(user.id);
            }
            ReferenceEvent::CurrentUser(Err(err)) => {
                warn!("Could not resolve current user: {}", err);
            }
        }
    }

    /// Runs the remote city search and lists the results in the location picker.
    pub async fn search_locations(&mut self, query: &str) -> Result<&[City], ApiError> {
        let mut cities = self.service.search_cities(query).await?;
        debug!("City search '{}' returned {} results", query, cities.len());
        cities.truncate(self.locations.max_results());
        self.locations.set_source(cities);
        Ok(self.locations.source())
    }

    /// Whether the submit trigger should be enabled.
    pub fn can_submit(&self) -> bool {
        !self.loading.any()
            && self.reference.status.company.is_ready()
            && self.form.user_id.is_some()
    }

    pub fn field_prompts(&self) -> Vec<FieldPrompt> {
        field_prompts(&self.form, &self.majors, &self.locations)
    }

    /// Normalizes the draft and posts it as a review of the session's company.
    ///
    /// On success the company page becomes the pending route. On failure the draft is kept
    /// and its error message describes what went wrong.
    ///
    /// Callers gate this on [`can_submit`](Self::can_submit); submitting while reference
    /// fetches are in flight lowers the loading flags before those fetches land.
    pub async fn submit(&mut self) -> Result<Route, SubmitError> {
        let (company_id, company_name) = match &self.reference.company {
            Some(company) => (company.id, company.name.clone()),
            None => return Err(SubmitError::CompanyUnresolved),
        };
        if self.form.user_id.is_none() {
            return Err(SubmitError::Unauthenticated);
        }

        if self.loading.any() {
            debug!("Submit started while reference data is still loading");
        }
        self.loading.raise();

        let payload = match normalize(&self.form, &self.majors, &self.locations) {
            Ok(payload) => payload,
            Err(issue) => {
                warn!("Review not submitted: {}", issue);
                self.form.set_error(issue.to_string());
                self.loading.lower();
                return Err(issue.into());
            }
        };

        info!("Submitting review for company {} ({})", company_name, company_id);

        match self.service.create_review(company_id, &payload).await {
            Ok(record) => {
                info!("Review {} created for company {}", record.id, company_name);
                self.loading.lower();
                self.form.clear_error();
                let route = Route::Company(company_name);
                self.pending_route = Some(route.clone());
                Ok(route)
            }
            Err(err) => {
                warn!("Review submission failed: {}", err);
                let message = err
                    .server_message()
                    .unwrap_or(DEFAULT_ERROR_MESSAGE)
                    .to_string();
                self.form.set_error(message.clone());
                self.loading.lower();

                if err.is_unauthorized() {
                    self.next_after_login = Some(Route::ReviewForm(company_name));
                    self.pending_route = Some(Route::NotFound);
                }

                Err(SubmitError::Remote {
                    message,
                    source: err,
                })
            }
        }
    }

    /// Route the UI should navigate to, if the session has asked for one.
    pub fn take_pending_route(&mut self) -> Option<Route> {
        self.pending_route.take()
    }

    /// Where to return after signing in again, set when the backend rejected our token.
    pub fn next_after_login(&self) -> Option<&Route> {
        self.next_after_login.as_ref()
    }

    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    pub fn company(&self) -> Option<&Company> {
        self.reference.company.as_ref()
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    pub fn loading(&self) -> LoadingFlags {
        self.loading
    }

    pub fn form(&self) -> &FormModel {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormModel {
        &mut self.form
    }

    pub fn wizard(&self) -> &WizardController {
        &self.wizard
    }

    pub fn wizard_mut(&mut self) -> &mut WizardController {
        &mut self.wizard
    }

    pub fn majors(&self) -> &SearchBox<Major> {
        &self.majors
    }

    pub fn majors_mut(&mut self) -> &mut SearchBox<Major> {
        &mut self.majors
    }

    pub fn locations(&self) -> &SearchBox<City> {
        &self.locations
    }

    pub fn locations_mut(&mut self) -> &mut SearchBox<City> {
        &mut self.locations
    }
}

fn failed(resource: &str, err: &ApiError) -> LoadState {
    warn!("Failed to load {}: {}", resource, err);
    LoadState::Failed(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{SelectionProvider, ValidationIssue, WizardStep};
    use crate::search::LOCATION_MAX_RESULTS;
    use crate::testing::{sample_company, FakeAuth, FakeService};

    const TIMEOUT: Duration = Duration::from_secs(10);

    fn open(service: &Arc<FakeService>) -> ReviewSession {
        ReviewSession::open(
            service.clone(),
            Arc::new(FakeAuth::signed_in(8)),
            "Acme",
            TIMEOUT,
        )
        .unwrap()
    }

    async fn loaded_session(service: &Arc<FakeService>) -> ReviewSession {
        let mut session = open(service);
        session.finish_loading().await;
        session
    }

    async fn fill_required(session: &mut ReviewSession) {
        assert!(session.majors_mut().select(11));
        session.search_locations("bos").await.unwrap();
        assert!(session.locations_mut().select(21));
    }

    #[tokio::test]
    async fn test_open_without_auth_redirects_to_login() {
        let service = Arc::new(FakeService::builder().company(sample_company()).build());
        let result = ReviewSession::open(
            service.clone(),
            Arc::new(FakeAuth::signed_out()),
            "Acme",
            TIMEOUT,
        );

        let err = result.err().unwrap();
        assert_eq!(err.redirect, Route::Login);
    }

    #[tokio::test]
    async fn test_fresh_session_is_loading_on_step_one() {
        let service = Arc::new(FakeService::builder().company(sample_company()).build());
        let session = open(&service);

        assert_eq!(session.loading(), LoadingFlags::default());
        assert_eq!(session.wizard().current(), WizardStep::Step1);
        assert!(!session.can_submit());
        assert!(session.form().user_id.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_main_flag_clears_without_waiting_for_perks() {
        let service = Arc::new(
            FakeService::builder()
                .company(sample_company())
                .perks_delay(Duration::from_secs(5))
                .build(),
        );
        let mut session = open(&service);

        while session.reference().status.company.is_pending() {
            assert!(session.next_reference_event().await);
        }
        assert!(!session.loading().main);
        assert!(session.loading().perks);

        session.finish_loading().await;
        assert!(!session.loading().perks);
        assert!(session.reference().status.all_settled());
        assert_eq!(session.form().user_id, Some(8));
    }

    #[tokio::test]
    async fn test_loading_annotates_majors_and_resets_perks() {
        let service = Arc::new(FakeService::builder().company(sample_company()).build());
        let session = loaded_session(&service).await;

        let major = &session.majors().source()[0];
        assert_eq!(major.title.as_deref(), Some("Computer Science"));
        assert_eq!(major.description.as_deref(), Some("CS"));

        assert_eq!(session.form().perks.catalogue().len(), 3);
        assert!(session
            .form()
            .perks
            .catalogue()
            .iter()
            .all(|perk| !perk.is_selected));
        assert_eq!(session.reference().pay_types.len(), 3);
        assert_eq!(session.reference().fetched_pay_types.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_company_fails_alone() {
        let service = Arc::new(FakeService::builder().build());
        let mut session = loaded_session(&service).await;

        assert!(session.reference().status.company.failure().is_some());
        assert!(session.reference().status.perks.is_ready());
        assert!(!session.loading().main);
        assert!(!session.can_submit());

        let err = session.submit().await.unwrap_err();
        assert!(matches!(err, SubmitError::CompanyUnresolved));
        assert!(service.submissions().is_empty());
    }

    #[tokio::test]
    async fn test_failed_perks_still_lower_the_perks_flag() {
        let service = Arc::new(
            FakeService::builder()
                .company(sample_company())
                .perks_fail()
                .build(),
        );
        let session = loaded_session(&service).await;

        assert!(session.reference().status.perks.failure().is_some());
        assert!(!session.loading().perks);
    }

    #[tokio::test]
    async fn test_successful_submit_clears_flags_and_routes_to_company() {
        let service = Arc::new(FakeService::builder().company(sample_company()).build());
        let mut session = loaded_session(&service).await;
        fill_required(&mut session).await;
        session.form_mut().set_error("stale");

        let route = session.submit().await.unwrap();

        assert_eq!(route, Route::Company("Acme".to_string()));
        assert_eq!(
            session.loading(),
            LoadingFlags {
                main: false,
                perks: false
            }
        );
        assert!(!session.form().error);
        assert_eq!(session.take_pending_route(), Some(route));
        assert_eq!(session.take_pending_route(), None);
        assert_eq!(service.submissions()[0].0, 3);
    }

    #[tokio::test]
    async fn test_remote_error_surfaces_server_message() {
        let service = Arc::new(
            FakeService::builder()
                .company(sample_company())
                .reject_reviews(422, Some("X"))
                .build(),
        );
        let mut session = loaded_session(&service).await;
        fill_required(&mut session).await;
        session.form_mut().set_job_title("Intern");

        let err = session.submit().await.unwrap_err();

        assert!(err.is_retryable());
        assert_eq!(session.form().error_message, "X");
        assert!(session.form().error);
        assert!(!session.loading().any());
        assert_eq!(session.form().job_title, "Intern");
        assert_eq!(session.take_pending_route(), None);
    }

    #[tokio::test]
    async fn test_remote_error_without_message_uses_generic_text() {
        let service = Arc::new(
            FakeService::builder()
                .company(sample_company())
                .reject_reviews(500, None)
                .build(),
        );
        let mut session = loaded_session(&service).await;
        fill_required(&mut session).await;

        session.submit().await.unwrap_err();
        assert_eq!(session.form().error_message, DEFAULT_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn test_unauthorized_submit_routes_to_not_found_and_remembers_form() {
        let service = Arc::new(
            FakeService::builder()
                .company(sample_company())
                .reject_reviews(401, Some("Authorization Required"))
                .build(),
        );
        let mut session = loaded_session(&service).await;
        fill_required(&mut session).await;

        session.submit().await.unwrap_err();
        assert_eq!(session.take_pending_route(), Some(Route::NotFound));
        assert_eq!(
            session.next_after_login(),
            Some(&Route::ReviewForm("Acme".to_string()))
        );
    }

    #[tokio::test]
    async fn test_validation_failure_makes_no_network_call() {
        let service = Arc::new(FakeService::builder().company(sample_company()).build());
        let mut session = loaded_session(&service).await;
        session.search_locations("bos").await.unwrap();
        session.locations_mut().select(21);

        let err = session.submit().await.unwrap_err();

        assert!(matches!(
            err,
            SubmitError::Validation(ValidationIssue::MissingMajor)
        ));
        assert!(service.submissions().is_empty());
        assert!(session.form().error);
        assert_eq!(session.form().error_message, "Please enter your major");
        assert!(!session.loading().any());
    }

    #[tokio::test]
    async fn test_manual_retry_after_failure_succeeds() {
        let service = Arc::new(FakeService::builder().company(sample_company()).build());
        let mut session = loaded_session(&service).await;
        session.search_locations("bos").await.unwrap();
        session.locations_mut().select(21);

        assert!(session.submit().await.is_err());
        session.majors_mut().select(12);
        assert!(session.submit().await.is_ok());
        assert_eq!(service.submissions().len(), 1);
    }

    #[tokio::test]
    async fn test_wizard_is_never_advanced_by_the_session() {
        let service = Arc::new(FakeService::builder().company(sample_company()).build());
        let mut session = loaded_session(&service).await;
        fill_required(&mut session).await;
        session.submit().await.unwrap();

        assert_eq!(session.wizard().current(), WizardStep::Step1);
    }

    #[tokio::test]
    async fn test_city_results_are_capped_at_location_limit() {
        let cities = (0..15)
            .map(|n| City {
                id: 100 + n,
                title: format!("Boston {n}"),
                description: None,
            })
            .collect();
        let service = Arc::new(
            FakeService::builder()
                .company(sample_company())
                .cities(cities)
                .build(),
        );
        let mut session = loaded_session(&service).await;

        let listed = session.search_locations("bos").await.unwrap();
        assert_eq!(listed.len(), LOCATION_MAX_RESULTS);
        assert_eq!(listed[0].id, 100);
        assert!(!session.locations_mut().select(112));
    }

    #[tokio::test]
    async fn test_end_to_end_submission() {
        let service = Arc::new(FakeService::builder().company(sample_company()).build());
        let mut session = loaded_session(&service).await;

        session.wizard_mut().go_to(WizardStep::Step1);
        let major_id = session.majors().search("computer")[0].id;
        session.majors_mut().select(major_id);
        session.search_locations("Boston").await.unwrap();
        session.locations_mut().select(21);

        session.wizard_mut().next();
        let form = session.form_mut();
        form.toggle_perk(1);
        form.toggle_perk(2);
        form.toggle_perk(1);
        form.set_ratings([5, 4, 3]);

        session.wizard_mut().next();
        session.form_mut().set_pay("$50,000");
        assert!(session.wizard().is_final());
        assert!(session.can_submit());
        assert!(session.field_prompts().is_empty());

        session.submit().await.unwrap();

        let (company_id, payload) = service.submissions().remove(0);
        assert_eq!(company_id, 3);
        assert_eq!(payload.perks, vec![2]);
        assert_eq!(payload.majors, vec![11]);
        assert_eq!(payload.location, 21);
        assert_eq!(payload.pay.as_deref(), Some("50000"));
        assert_eq!(payload.difficulty_rating, 3);
        assert_eq!(payload.user_id, 8);
        assert_eq!(session.locations().selected_id(), Some(21));
    }
}
