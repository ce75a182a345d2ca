//! Review form client — loads a company's reference data, drives the three-step review
//! draft, and submits the normalized review to the backend.

pub mod api_client;
pub mod config;
pub mod draft;
pub mod errors;
pub mod form;
pub mod models;
pub mod reference;
pub mod search;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;
