//! Reference data — the company record and the catalogues the form offers.

pub mod loader;
pub mod state;

pub use loader::{ReferenceDataLoader, ReferenceEvent};
pub use state::{LoadState, LoadingFlags, ReferenceData, ReferenceStatus};
