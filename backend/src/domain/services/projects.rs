//! Project service: creation is gated on the owner existing in the user
//! service.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::map_store_error;
use crate::domain::creation::{CreationError, CreationGate};
use crate::domain::ports::{ExistenceProbe, ProjectRepository, ProjectService};
use crate::domain::{Error, NewProject, Project, ProjectId};

/// Project service backed by a [`ProjectRepository`] and a user probe.
pub struct ProjectServiceImpl<R: ?Sized, P: ?Sized> {
    repo: Arc<R>,
    gate: CreationGate<P>,
    clock: Arc<dyn Clock>,
}

impl<R: ?Sized, P: ?Sized> Clone for ProjectServiceImpl<R, P> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            gate: self.gate.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, P> ProjectServiceImpl<R, P>
where
    R: ProjectRepository + ?Sized,
    P: ExistenceProbe + ?Sized,
{
    pub fn new(repo: Arc<R>, owner_probe: Arc<P>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repo,
            gate: CreationGate::new(owner_probe),
            clock,
        }
    }

    /// Validate the owner, then persist the project.
    pub async fn create_project(
        &self,
        project: NewProject,
        cancellation: &CancellationToken,
    ) -> Result<Project, CreationError> {
        let owner = project.owner_user_id();
        let created = self
            .gate
            .create(owner.get(), cancellation, || {
                self.repo.create(&project, self.clock.utc())
            })
            .await?;
        info!(project_id = %created.id, owner_user_id = %owner, "created project");
        Ok(created)
    }
}

#[async_trait]
impl<R, P> ProjectService for ProjectServiceImpl<R, P>
where
    R: ProjectRepository + ?Sized,
    P: ExistenceProbe + ?Sized,
{
    async fn create(
        &self,
        project: NewProject,
        cancellation: &CancellationToken,
    ) -> Result<Project, Error> {
        self.create_project(project, cancellation)
            .await
            .map_err(Error::from)
    }

    async fn get(&self, id: ProjectId) -> Result<Project, Error> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::not_found(format!("project {id} not found")))
    }
}
