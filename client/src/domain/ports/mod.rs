//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod auth_api;
mod compliments_api;
mod key_value_store;
mod tasks_api;
mod users_api;

#[cfg(test)]
pub use auth_api::MockAuthApi;
pub use auth_api::AuthApi;
#[cfg(test)]
pub use compliments_api::MockComplimentsApi;
pub use compliments_api::ComplimentsApi;
#[cfg(test)]
pub use key_value_store::MockKeyValueStore;
pub use key_value_store::{
    KeyValueStore, KeyValueStoreError, LOCALE_KEY, TENANT_ID_KEY, TOKEN_KEY, USER_ID_KEY,
    USER_NAME_KEY,
};
#[cfg(test)]
pub use tasks_api::MockTasksApi;
pub use tasks_api::{
    DEFAULT_HISTORY_LIMIT, DEFAULT_UPCOMING_LIMIT, DEFAULT_USER_HISTORY_LIMIT, TasksApi,
};
#[cfg(test)]
pub use users_api::MockUsersApi;
pub use users_api::UsersApi;
