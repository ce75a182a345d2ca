use crate::form::perks::PerkSelectionSet;
use crate::models::{default_pay_types, PayType};

pub const DEFAULT_ERROR_MESSAGE: &str = "Something went wrong, try submitting again";

/// The mutable review draft for one form session.
///
/// Widgets never write fields directly; they call the setters below.
#[derive(Debug, Clone, PartialEq)]
pub struct FormModel {
    pub error: bool,
    pub error_message: String,

    pub overall_rating: u8,
    pub culture_rating: u8,
    pub difficulty_rating: u8,

    pub description: String,

    pub pay: String,
    pay_type_id: i64,
    pub job_title: String,

    /// Populated once the current user resolves.
    pub user_id: Option<i64>,

    pub perks: PerkSelectionSet,

    pub return_offer: bool,
    pub recommend: bool,
    pub anonymous: bool,
}

impl Default for FormModel {
    fn default() -> Self {
        Self::new(&default_pay_types())
    }
}

impl FormModel {
    /// New draft defaulting to the first offered pay type, or `Hourly` when none are offered.
    pub fn new(pay_types: &[PayType]) -> Self {
        let pay_type_id = pay_types
            .first()
            .map(|p| p.id)
            .or_else(|| default_pay_types().first().map(|p| p.id))
            .unwrap_or(1);

        Self {
            error: false,
            error_message: DEFAULT_ERROR_MESSAGE.to_string(),
            overall_rating: 0,
            culture_rating: 0,
            difficulty_rating: 0,
            description: String::new(),
            pay: String::new(),
            pay_type_id,
            job_title: String::new(),
            user_id: None,
            perks: PerkSelectionSet::default(),
            return_offer: false,
            recommend: false,
            anonymous: true,
        }
    }

    pub fn pay_type_id(&self) -> i64 {
        self.pay_type_id
    }

    pub fn set_pay_type(&mut self, pay_type: &PayType) {
        self.pay_type_id = pay_type.id;
    }

    /// Rating widget callback: `[overall, culture, difficulty]`.
    pub fn set_ratings(&mut self, ratings: [u8; 3]) {
        let [overall, culture, difficulty] = ratings;
        self.overall_rating = overall;
        self.culture_rating = culture;
        self.difficulty_rating = difficulty;
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn set_pay(&mut self, pay: impl Into<String>) {
        self.pay = pay.into();
    }

    pub fn set_job_title(&mut self, job_title: impl Into<String>) {
        self.job_title = job_title.into();
    }

    pub fn set_user_id(&mut self, user_id: i64) {
        self.user_id = Some(user_id);
    }

    pub fn toggle_anonymous(&mut self) {
        self.anonymous = !self.anonymous;
    }

    pub fn toggle_return_offer(&mut self) {
        self.return_offer = !self.return_offer;
    }

    pub fn toggle_recommend(&mut self) {
        self.recommend = !self.recommend;
    }

    pub fn toggle_perk(&mut self, perk_id: i64) -> Option<bool> {
        self.perks.toggle(perk_id)
    }

    /// Shows `message` as the single current error.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error_message = message.into();
        self.error = true;
    }

    pub fn clear_error(&mut self) {
        self.error = false;
    }
}
