//! Reqwest adapters for the backend resource ports.
//!
//! Every adapter shares one [`ApiTransport`], so base URL, bearer handling,
//! and error translation are decided in a single place.

mod auth;
mod compliments;
mod dto;
mod tasks;
mod transport;
mod users;

pub use auth::HttpAuthApi;
pub use compliments::HttpComplimentsApi;
pub use tasks::HttpTasksApi;
pub use transport::{ApiTransport, ResourceFamily};
pub use users::HttpUsersApi;
