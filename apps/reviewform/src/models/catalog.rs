use serde::{Deserialize, Serialize};

/// A field of study offered in the majors search box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Major {
    pub id: i64,
    pub code: String,
    pub name: String,
    /// Display title, derived from `name` once the catalogue is loaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Display description, derived from `code` once the catalogue is loaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Major {
    /// Fills the search-box display fields. Identity fields are left untouched.
    pub fn annotate(&mut self) {
        self.title = Some(self.name.clone());
        self.description = Some(self.code.clone());
    }
}

/// A workplace perk that can be attached to a review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Perk {
    pub id: i64,
    pub name: String,
    /// Session-only selection flag. Never sent to the server.
    #[serde(skip)]
    pub is_selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayType {
    pub id: i64,
    pub name: String,
}

/// The pay types offered by the form regardless of what the backend returns.
pub fn default_pay_types() -> Vec<PayType> {
    [(1, "Hourly"), (2, "Salary (Monthly)"), (3, "Stipend")]
        .into_iter()
        .map(|(id, name)| PayType {
            id,
            name: name.to_string(),
        })
        .collect()
}
