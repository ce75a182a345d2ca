use serde::{Deserialize, Serialize};

/// The normalized review body posted to `Companies/{id}/reviews`.
///
/// Built fresh from the form on every submit attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub anonymous: bool,
    pub return_offer: bool,
    pub recommend: bool,
    pub description: String,
    pub overall_rating: u8,
    pub culture_rating: u8,
    pub difficulty_rating: u8,
    pub pay: Option<String>,
    pub user_id: i64,
    pub pay_type_id: i64,
    pub job_title: Option<String>,
    pub perks: Vec<i64>,
    pub majors: Vec<i64>,
    pub location: i64,
}

/// A stored review, as echoed back on creation or nested in a company record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReviewRecord {
    pub id: i64,
    pub company_id: Option<i64>,
    pub overall_rating: Option<u8>,
    pub culture_rating: Option<u8>,
    pub difficulty_rating: Option<u8>,
    pub description: Option<String>,
    pub job_title: Option<String>,
    pub pay: Option<String>,
}
