//! Assignment service: creation is gated on the project existing in the
//! project service; status updates are local only.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::map_store_error;
use crate::domain::creation::{CreationError, CreationGate};
use crate::domain::ports::{AssignmentRepository, AssignmentService, ExistenceProbe};
use crate::domain::{Assignment, AssignmentId, AssignmentStatus, Error, NewAssignment};

/// Assignment service backed by an [`AssignmentRepository`] and a project
/// probe.
pub struct AssignmentServiceImpl<R: ?Sized, P: ?Sized> {
    repo: Arc<R>,
    gate: CreationGate<P>,
    clock: Arc<dyn Clock>,
}

impl<R: ?Sized, P: ?Sized> Clone for AssignmentServiceImpl<R, P> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            gate: self.gate.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, P> AssignmentServiceImpl<R, P>
where
    R: AssignmentRepository + ?Sized,
    P: ExistenceProbe + ?Sized,
{
    pub fn new(repo: Arc<R>, project_probe: Arc<P>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repo,
            gate: CreationGate::new(project_probe),
            clock,
        }
    }

    /// Validate the project, then persist the assignment as `ToDo`.
    pub async fn create_assignment(
        &self,
        assignment: NewAssignment,
        cancellation: &CancellationToken,
    ) -> Result<Assignment, CreationError> {
        let project = assignment.project_id();
        let created = self
            .gate
            .create(project.get(), cancellation, || {
                self.repo.create(&assignment, self.clock.utc())
            })
            .await?;
        info!(assignment_id = %created.id, project_id = %project, "created assignment");
        Ok(created)
    }
}

#[async_trait]
impl<R, P> AssignmentService for AssignmentServiceImpl<R, P>
where
    R: AssignmentRepository + ?Sized,
    P: ExistenceProbe + ?Sized,
{
    async fn create(
        &self,
        assignment: NewAssignment,
        cancellation: &CancellationToken,
    ) -> Result<Assignment, Error> {
        self.create_assignment(assignment, cancellation)
            .await
            .map_err(Error::from)
    }

    async fn get(&self, id: AssignmentId) -> Result<Assignment, Error> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::not_found(format!("assignment {id} not found")))
    }

    async fn update_status(
        &self,
        id: AssignmentId,
        status: AssignmentStatus,
    ) -> Result<Assignment, Error> {
        let updated = self
            .repo
            .update_status(id, status, self.clock.utc())
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::not_found(format!("assignment {id} not found")))?;
        info!(assignment_id = %id, %status, "updated assignment status");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockAssignmentRepository, MockExistenceProbe};
    use crate::domain::services::fixtures::{fixture_clock, fixture_timestamp};
    use crate::domain::{ErrorCode, ExistenceOutcome, ParentKind, ProbeCancelled, ProjectId};

    fn new_assignment() -> NewAssignment {
        NewAssignment::try_new("Write docs", None, ProjectId::new(2)).expect("valid assignment")
    }

    fn idle_probe() -> Arc<MockExistenceProbe> {
        Arc::new(MockExistenceProbe::new())
    }

    #[tokio::test]
    async fn confirmed_project_creates_todo_assignment() {
        let mut probe = MockExistenceProbe::new();
        probe.expect_parent().return_const(ParentKind::Project);
        probe
            .expect_probe()
            .withf(|id, _| *id == 2)
            .times(1)
            .return_once(|_, _| Ok(ExistenceOutcome::Confirmed));
        let mut repo = MockAssignmentRepository::new();
        repo.expect_create().times(1).return_once(|assignment, created_at| {
            Ok(assignment
                .clone()
                .into_assignment(AssignmentId::new(1), created_at))
        });
        let service = AssignmentServiceImpl::new(Arc::new(repo), Arc::new(probe), fixture_clock());

        let assignment = service
            .create(new_assignment(), &CancellationToken::new())
            .await
            .expect("assignment created");

        assert_eq!(assignment.status, AssignmentStatus::ToDo);
        assert_eq!(assignment.project_id, ProjectId::new(2));
        assert!(assignment.updated_at.is_none());
    }

    #[tokio::test]
    async fn caller_cancellation_skips_store() {
        let mut probe = MockExistenceProbe::new();
        probe.expect_parent().return_const(ParentKind::Project);
        probe
            .expect_probe()
            .times(1)
            .return_once(|_, _| Err(ProbeCancelled));
        let mut repo = MockAssignmentRepository::new();
        repo.expect_create().never();
        let service = AssignmentServiceImpl::new(Arc::new(repo), Arc::new(probe), fixture_clock());

        let err = service
            .create_assignment(new_assignment(), &CancellationToken::new())
            .await
            .expect_err("cancelled");

        assert_eq!(
            err,
            CreationError::Cancelled {
                parent: ParentKind::Project
            }
        );
    }

    #[tokio::test]
    async fn update_status_stamps_updated_at() {
        let mut repo = MockAssignmentRepository::new();
        repo.expect_update_status()
            .withf(|id, status, updated_at| {
                *id == AssignmentId::new(1)
                    && *status == AssignmentStatus::Done
                    && *updated_at == fixture_timestamp()
            })
            .times(1)
            .return_once(|id, status, updated_at| {
                let mut assignment = new_assignment().into_assignment(id, fixture_timestamp());
                assignment.status = status;
                assignment.updated_at = Some(updated_at);
                Ok(Some(assignment))
            });
        let service = AssignmentServiceImpl::new(Arc::new(repo), idle_probe(), fixture_clock());

        let updated = service
            .update_status(AssignmentId::new(1), AssignmentStatus::Done)
            .await
            .expect("status updated");

        assert_eq!(updated.status, AssignmentStatus::Done);
        assert_eq!(updated.updated_at, Some(fixture_timestamp()));
    }

    #[tokio::test]
    async fn update_status_of_missing_assignment_is_not_found() {
        let mut repo = MockAssignmentRepository::new();
        repo.expect_update_status()
            .times(1)
            .return_once(|_, _, _| Ok(None));
        let service = AssignmentServiceImpl::new(Arc::new(repo), idle_probe(), fixture_clock());

        let err = service
            .update_status(AssignmentId::new(8), AssignmentStatus::InProgress)
            .await
            .expect_err("missing assignment");

        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
