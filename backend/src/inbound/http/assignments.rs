//! Assignment service HTTP handlers.
//!
//! ```text
//! POST /api/Assignment {"title":"Write docs","projectId":1}
//! GET  /api/Assignment/{id}
//! PUT  /api/Assignment/{id}/status {"status":"Done"}
//! ```

use actix_web::{HttpRequest, HttpResponse, get, http::header, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{
    Assignment, AssignmentId, AssignmentStatus, Error, NewAssignment, ProjectId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::AssignmentHttpState;
use crate::inbound::http::validation::missing_field_error;

/// Request body for `POST /api/Assignment`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssignmentRequest {
    #[schema(example = "Write docs")]
    pub title: Option<String>,
    pub description: Option<String>,
    #[schema(example = 1)]
    pub project_id: Option<i32>,
}

impl TryFrom<CreateAssignmentRequest> for NewAssignment {
    type Error = Error;

    fn try_from(value: CreateAssignmentRequest) -> Result<Self, Self::Error> {
        let title = value.title.unwrap_or_default();
        let project = value
            .project_id
            .ok_or_else(|| missing_field_error("projectId"))?;
        Ok(NewAssignment::try_new(
            title,
            value.description,
            ProjectId::new(project),
        )?)
    }
}

/// Request body for `PUT /api/Assignment/{id}/status`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    #[schema(example = "InProgress")]
    pub status: Option<String>,
}

fn parse_status(request: UpdateStatusRequest) -> Result<AssignmentStatus, Error> {
    let raw = request.status.ok_or_else(|| missing_field_error("status"))?;
    raw.parse().map_err(|_| {
        Error::invalid_request("status must be one of ToDo, InProgress, Done").with_details(
            json!({
                "field": "status",
                "value": raw,
                "code": "invalid_status",
            }),
        )
    })
}

/// Create an assignment in an existing project.
#[utoipa::path(
    post,
    path = "/api/Assignment",
    request_body = CreateAssignmentRequest,
    responses(
        (status = 201, description = "Assignment created", body = Assignment,
            headers(("Location" = String, description = "URL of the created assignment"))),
        (status = 400, description = "Invalid request or project does not exist", body = Error),
        (status = 503, description = "Project service could not confirm the project", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["assignments"],
    operation_id = "createAssignment"
)]
#[post("/Assignment")]
pub async fn create_assignment(
    req: HttpRequest,
    state: web::Data<AssignmentHttpState>,
    payload: web::Json<CreateAssignmentRequest>,
) -> ApiResult<HttpResponse> {
    let assignment = NewAssignment::try_from(payload.into_inner())?;
    let cancellation = state.request_cancellation(&req);
    let created = state
        .assignments
        .create(assignment, cancellation.token())
        .await?;
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/api/Assignment/{}", created.id)))
        .json(created))
}

/// Fetch an assignment by id.
#[utoipa::path(
    get,
    path = "/api/Assignment/{id}",
    params(("id" = i32, Path, description = "Assignment identifier")),
    responses(
        (status = 200, description = "Assignment", body = Assignment),
        (status = 404, description = "No such assignment", body = Error)
    ),
    tags = ["assignments"],
    operation_id = "getAssignment"
)]
#[get("/Assignment/{id}")]
pub async fn get_assignment(
    state: web::Data<AssignmentHttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<Assignment>> {
    let assignment = state
        .assignments
        .get(AssignmentId::new(path.into_inner()))
        .await?;
    Ok(web::Json(assignment))
}

/// Move an assignment to a new status.
///
/// The parent project is not re-validated.
#[utoipa::path(
    put,
    path = "/api/Assignment/{id}/status",
    params(("id" = i32, Path, description = "Assignment identifier")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Updated assignment", body = Assignment),
        (status = 400, description = "Unknown status", body = Error),
        (status = 404, description = "No such assignment", body = Error)
    ),
    tags = ["assignments"],
    operation_id = "updateAssignmentStatus"
)]
#[put("/Assignment/{id}/status")]
pub async fn update_assignment_status(
    state: web::Data<AssignmentHttpState>,
    path: web::Path<i32>,
    payload: web::Json<UpdateStatusRequest>,
) -> ApiResult<web::Json<Assignment>> {
    let status = parse_status(payload.into_inner())?;
    let updated = state
        .assignments
        .update_status(AssignmentId::new(path.into_inner()), status)
        .await?;
    Ok(web::Json(updated))
}

/// Mount the assignment routes under the caller's scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_assignment)
        .service(get_assignment)
        .service(update_assignment_status);
}
