//! Shared HTTP adapter state, one bundle per service role.
//!
//! Handlers accept these via `actix_web::web::Data` so they depend only on
//! driving ports and stay testable without I/O.

use std::sync::Arc;

use actix_web::HttpRequest;
use tokio_util::sync::CancellationToken;

use crate::domain::ports::{AssignmentService, ProjectService, UserService};

use super::cancellation::RequestCancellation;

/// Dependencies for the user service routes.
#[derive(Clone)]
pub struct UserHttpState {
    pub users: Arc<dyn UserService>,
}

impl UserHttpState {
    pub fn new(users: Arc<dyn UserService>) -> Self {
        Self { users }
    }
}

/// Dependencies for the project service routes.
#[derive(Clone)]
pub struct ProjectHttpState {
    pub projects: Arc<dyn ProjectService>,
    shutdown: CancellationToken,
}

impl ProjectHttpState {
    pub fn new(projects: Arc<dyn ProjectService>, shutdown: CancellationToken) -> Self {
        Self { projects, shutdown }
    }

    pub fn request_cancellation(&self, req: &HttpRequest) -> RequestCancellation {
        RequestCancellation::for_request(req, &self.shutdown)
    }
}

/// Dependencies for the assignment service routes.
#[derive(Clone)]
pub struct AssignmentHttpState {
    pub assignments: Arc<dyn AssignmentService>,
    shutdown: CancellationToken,
}

impl AssignmentHttpState {
    pub fn new(assignments: Arc<dyn AssignmentService>, shutdown: CancellationToken) -> Self {
        Self {
            assignments,
            shutdown,
        }
    }

    pub fn request_cancellation(&self, req: &HttpRequest) -> RequestCancellation {
        RequestCancellation::for_request(req, &self.shutdown)
    }
}
