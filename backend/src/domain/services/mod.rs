//! Implementations of the driving service ports.

mod assignments;
mod projects;
mod users;

#[cfg(test)]
mod fixtures;

pub use assignments::AssignmentServiceImpl;
pub use projects::ProjectServiceImpl;
pub use users::UserServiceImpl;

use tracing::error;

use crate::domain::Error;
use crate::domain::creation::CreationError;
use crate::domain::ports::RecordStoreError;

/// Log a store failure and surface it as an internal error.
fn map_store_error(err: RecordStoreError) -> Error {
    error!(error = %err, "record store failed");
    CreationError::Persistence(err).into()
}
