//! Persistence ports for the three record stores.
//!
//! Each service owns exactly one store. Identifiers are assigned by the
//! store on insert; timestamps are supplied by the caller so services stay
//! in control of the clock.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{
    Assignment, AssignmentId, AssignmentStatus, NewAssignment, NewProject, NewUser, Project,
    ProjectId, User, UserId,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by record store adapters.
    pub enum RecordStoreError {
        /// Store connection could not be established.
        Connection { message: String } => "record store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "record store query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user and return it with its assigned identifier.
    async fn create(
        &self,
        user: &NewUser,
        created_at: DateTime<Utc>,
    ) -> Result<User, RecordStoreError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RecordStoreError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Insert a project and return it with its assigned identifier.
    async fn create(
        &self,
        project: &NewProject,
        created_at: DateTime<Utc>,
    ) -> Result<Project, RecordStoreError>;

    /// Fetch a project by identifier.
    async fn find_by_id(&self, id: ProjectId) -> Result<Option<Project>, RecordStoreError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    /// Insert an assignment and return it with its assigned identifier.
    async fn create(
        &self,
        assignment: &NewAssignment,
        created_at: DateTime<Utc>,
    ) -> Result<Assignment, RecordStoreError>;

    /// Fetch an assignment by identifier.
    async fn find_by_id(&self, id: AssignmentId)
    -> Result<Option<Assignment>, RecordStoreError>;

    /// Set the status and update timestamp; `None` when no such assignment.
    async fn update_status(
        &self,
        id: AssignmentId,
        status: AssignmentStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Assignment>, RecordStoreError>;
}
