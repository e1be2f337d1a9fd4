//! Domain ports and supporting types for the hexagonal boundary.

mod store_health;
mod user_store;
mod users_command;
mod users_query;

#[cfg(test)]
pub use store_health::MockStoreHealth;
pub use store_health::{FixtureStoreHealth, StoreHealth, StoreStatus};
#[cfg(test)]
pub use user_store::MockUserStore;
pub use user_store::{UserStore, UserStoreError};
#[cfg(test)]
pub use users_command::MockUsersCommand;
pub use users_command::UsersCommand;
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;
