//! OpenAPI documentation configuration.
//!
//! One document covers all three service roles; each process only mounts
//! the routes of its own role, so Swagger UI lists operations that a given
//! deployment does not serve. Tags group them by role.

use utoipa::OpenApi;

use crate::domain::{Assignment, AssignmentStatus, Error, ErrorCode, Project, User};
use crate::inbound::http::assignments::{CreateAssignmentRequest, UpdateStatusRequest};
use crate::inbound::http::projects::CreateProjectRequest;
use crate::inbound::http::users::CreateUserRequest;

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Task board services API",
        description = "Users, projects and assignments. Projects and assignments are \
            only created once their parent has been confirmed by the upstream service."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::get_user,
        crate::inbound::http::projects::create_project,
        crate::inbound::http::projects::get_project,
        crate::inbound::http::assignments::create_assignment,
        crate::inbound::http::assignments::get_assignment,
        crate::inbound::http::assignments::update_assignment_status,
        crate::inbound::http::health::health,
    ),
    components(schemas(
        User,
        Project,
        Assignment,
        AssignmentStatus,
        Error,
        ErrorCode,
        CreateUserRequest,
        CreateProjectRequest,
        CreateAssignmentRequest,
        UpdateStatusRequest,
    )),
    tags(
        (name = "users", description = "User service"),
        (name = "projects", description = "Project service, validates owners against the user service"),
        (name = "assignments", description = "Assignment service, validates projects against the project service"),
        (name = "health", description = "Liveness probe")
    )
)]
pub struct ApiDoc;
