//! HTTP inbound adapter exposing the REST endpoints of each service role.

pub mod assignments;
pub mod cancellation;
pub mod error;
pub mod health;
pub mod projects;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub(crate) mod validation;

pub use error::ApiResult;
