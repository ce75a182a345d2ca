use serde::Serialize;

use crate::models::{default_pay_types, Company, PayType};

/// Progress of one reference-data fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "reason", rename_all = "snake_case")]
pub enum LoadState {
    #[default]
    Pending,
    Ready,
    Failed(String),
}

impl LoadState {
    pub fn is_pending(&self) -> bool {
        matches!(self, LoadState::Pending)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, LoadState::Ready)
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            LoadState::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReferenceStatus {
    pub company: LoadState,
    pub majors: LoadState,
    pub perks: LoadState,
    pub pay_types: LoadState,
}

impl ReferenceStatus {
    pub fn all_settled(&self) -> bool {
        [&self.company, &self.majors, &self.perks, &self.pay_types]
            .iter()
            .all(|state| !state.is_pending())
    }
}

/// UI loading indicators: `main` gates the page body, `perks` the perk picker.
///
/// Both start raised. Fetch completions only ever lower them; only a submit attempt raises them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoadingFlags {
    pub main: bool,
    pub perks: bool,
}

impl Default for LoadingFlags {
    fn default() -> Self {
        Self {
            main: true,
            perks: true,
        }
    }
}

impl LoadingFlags {
    pub fn any(&self) -> bool {
        self.main || self.perks
    }

    pub fn raise(&mut self) {
        self.main = true;
        self.perks = true;
    }

    pub fn lower(&mut self) {
        self.main = false;
        self.perks = false;
    }
}

/// Company record and pay types for the session. Majors and perks live with their pickers.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceData {
    pub company: Option<Company>,
    /// What the pay-type dropdown offers.
    pub pay_types: Vec<PayType>,
    /// What the backend returned, kept for callers that prefer it.
    pub fetched_pay_types: Vec<PayType>,
    pub status: ReferenceStatus,
}

impl Default for ReferenceData {
    fn default() -> Self {
        Self {
            company: None,
            pay_types: default_pay_types(),
            fetched_pay_types: Vec::new(),
            status: ReferenceStatus::default(),
        }
    }
}
