//! Driving port for the project service.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::domain::{Error, NewProject, Project, ProjectId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectService: Send + Sync {
    /// Create a project once its owner is confirmed by the user service.
    ///
    /// `cancellation` fires when the inbound request is abandoned.
    async fn create(
        &self,
        project: NewProject,
        cancellation: &CancellationToken,
    ) -> Result<Project, Error>;

    /// Fetch a project, failing with `not_found` when absent.
    async fn get(&self, id: ProjectId) -> Result<Project, Error>;
}
