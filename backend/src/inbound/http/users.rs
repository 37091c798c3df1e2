//! User service HTTP handlers.
//!
//! ```text
//! POST /api/User {"username":"ada","email":"ada@example.com"}
//! GET  /api/User/{id}
//! ```

use actix_web::{HttpResponse, get, http::header, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, NewUser, User, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::UserHttpState;

/// Request body for `POST /api/User`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[schema(example = "ada")]
    pub username: Option<String>,
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
}

impl TryFrom<CreateUserRequest> for NewUser {
    type Error = Error;

    fn try_from(value: CreateUserRequest) -> Result<Self, Self::Error> {
        Ok(NewUser::try_new(
            value.username.unwrap_or_default(),
            value.email.unwrap_or_default(),
        )?)
    }
}

/// Create a user.
#[utoipa::path(
    post,
    path = "/api/User",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = User,
            headers(("Location" = String, description = "URL of the created user"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/User")]
pub async fn create_user(
    state: web::Data<UserHttpState>,
    payload: web::Json<CreateUserRequest>,
) -> ApiResult<HttpResponse> {
    let user = NewUser::try_from(payload.into_inner())?;
    let created = state.users.create(user).await?;
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/api/User/{}", created.id)))
        .json(created))
}

/// Fetch a user by id.
#[utoipa::path(
    get,
    path = "/api/User/{id}",
    params(("id" = i32, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = User),
        (status = 404, description = "No such user", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/User/{id}")]
pub async fn get_user(
    state: web::Data<UserHttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<User>> {
    let user = state.users.get(UserId::new(path.into_inner())).await?;
    Ok(web::Json(user))
}

/// Mount the user routes under the caller's scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_user).service(get_user);
}
