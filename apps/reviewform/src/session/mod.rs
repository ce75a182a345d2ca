pub mod coordinator;
pub mod route;

pub use coordinator::ReviewSession;
pub use route::Route;
