use serde::{Deserialize, Serialize};

use crate::models::catalog::{Major, Perk};
use crate::models::review::ReviewRecord;

/// Company record as returned by `findOne` with the review form's includes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub perks: Vec<Perk>,
    #[serde(default)]
    pub majors: Vec<Major>,
    #[serde(default)]
    pub reviews: Vec<ReviewRecord>,
    #[serde(default)]
    pub locations: Vec<Location>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub region: Option<Region>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub id: i64,
    #[serde(default)]
    pub name: String,
}

/// A single result of the remote city search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}
