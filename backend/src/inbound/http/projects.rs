//! Project service HTTP handlers.
//!
//! ```text
//! POST /api/Project {"name":"TaskBoard","ownerUserId":1}
//! GET  /api/Project/{id}
//! ```
//!
//! Creation asks the user service whether `ownerUserId` exists before
//! anything is stored.

use actix_web::{HttpRequest, HttpResponse, get, http::header, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, NewProject, Project, ProjectId, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::ProjectHttpState;
use crate::inbound::http::validation::missing_field_error;

/// Request body for `POST /api/Project`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    #[schema(example = "TaskBoard")]
    pub name: Option<String>,
    pub description: Option<String>,
    #[schema(example = 1)]
    pub owner_user_id: Option<i32>,
}

impl TryFrom<CreateProjectRequest> for NewProject {
    type Error = Error;

    fn try_from(value: CreateProjectRequest) -> Result<Self, Self::Error> {
        let name = value.name.unwrap_or_default();
        let owner = value
            .owner_user_id
            .ok_or_else(|| missing_field_error("ownerUserId"))?;
        Ok(NewProject::try_new(name, value.description, UserId::new(owner))?)
    }
}

/// Create a project owned by an existing user.
#[utoipa::path(
    post,
    path = "/api/Project",
    request_body = CreateProjectRequest,
    responses(
        (status = 201, description = "Project created", body = Project,
            headers(("Location" = String, description = "URL of the created project"))),
        (status = 400, description = "Invalid request or owner does not exist", body = Error),
        (status = 503, description = "User service could not confirm the owner", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["projects"],
    operation_id = "createProject"
)]
#[post("/Project")]
pub async fn create_project(
    req: HttpRequest,
    state: web::Data<ProjectHttpState>,
    payload: web::Json<CreateProjectRequest>,
) -> ApiResult<HttpResponse> {
    let project = NewProject::try_from(payload.into_inner())?;
    let cancellation = state.request_cancellation(&req);
    let created = state
        .projects
        .create(project, cancellation.token())
        .await?;
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/api/Project/{}", created.id)))
        .json(created))
}

/// Fetch a project by id.
#[utoipa::path(
    get,
    path = "/api/Project/{id}",
    params(("id" = i32, Path, description = "Project identifier")),
    responses(
        (status = 200, description = "Project", body = Project),
        (status = 404, description = "No such project", body = Error)
    ),
    tags = ["projects"],
    operation_id = "getProject"
)]
#[get("/Project/{id}")]
pub async fn get_project(
    state: web::Data<ProjectHttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<Project>> {
    let project = state
        .projects
        .get(ProjectId::new(path.into_inner()))
        .await?;
    Ok(web::Json(project))
}

/// Mount the project routes under the caller's scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_project).service(get_project);
}
