//! HTTP inbound adapter exposing the REST endpoints.

pub mod cors;
pub mod error;
pub mod health;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use error::ApiResult;
