pub mod catalog;
pub mod company;
pub mod review;
pub mod user;

pub use catalog::{default_pay_types, Major, PayType, Perk};
pub use company::{City, Company, Location, Region};
pub use review::{ReviewRecord, SubmissionPayload};
pub use user::User;
