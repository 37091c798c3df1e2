//! Driving port for the assignment service.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::domain::{Assignment, AssignmentId, AssignmentStatus, Error, NewAssignment};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssignmentService: Send + Sync {
    /// Create an assignment once its project is confirmed by the project
    /// service.
    async fn create(
        &self,
        assignment: NewAssignment,
        cancellation: &CancellationToken,
    ) -> Result<Assignment, Error>;

    /// Fetch an assignment, failing with `not_found` when absent.
    async fn get(&self, id: AssignmentId) -> Result<Assignment, Error>;

    /// Move an assignment to `status`.
    ///
    /// The parent project is not re-validated.
    async fn update_status(
        &self,
        id: AssignmentId,
        status: AssignmentStatus,
    ) -> Result<Assignment, Error>;
}
