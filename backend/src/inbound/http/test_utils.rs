//! Shared helpers for HTTP handler tests.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use mockable::DefaultClock;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::domain::ports::{
    AssignmentService, ExistenceProbe, FixedExistenceProbe, ProjectService, UserService,
};
use crate::domain::{
    AssignmentServiceImpl, ExistenceOutcome, ParentKind, ProjectServiceImpl, UserServiceImpl,
};
use crate::inbound::http::error::{json_config, path_config};
use crate::inbound::http::state::{AssignmentHttpState, ProjectHttpState, UserHttpState};
use crate::inbound::http::{assignments, projects, users};
use crate::outbound::memory::{
    MemoryAssignmentRepository, MemoryProjectRepository, MemoryUserRepository,
};

fn base_app() -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new().app_data(json_config()).app_data(path_config())
}

pub(crate) fn user_service_app(service: Arc<dyn UserService>) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    base_app()
        .app_data(web::Data::new(UserHttpState::new(service)))
        .service(web::scope("/api").configure(users::configure))
}

pub(crate) fn user_app(repo: Arc<MemoryUserRepository>) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    user_service_app(Arc::new(UserServiceImpl::new(repo, Arc::new(DefaultClock))))
}

pub(crate) fn project_app(
    repo: Arc<MemoryProjectRepository>,
    probe: Arc<dyn ExistenceProbe>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    project_service_app(Arc::new(ProjectServiceImpl::new(
        repo,
        probe,
        Arc::new(DefaultClock),
    )))
}

pub(crate) fn project_service_app(service: Arc<dyn ProjectService>) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = ProjectHttpState::new(service, CancellationToken::new());
    base_app()
        .app_data(web::Data::new(state))
        .service(web::scope("/api").configure(projects::configure))
}

pub(crate) fn assignment_app(
    repo: Arc<MemoryAssignmentRepository>,
    probe: Arc<dyn ExistenceProbe>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    assignment_service_app(Arc::new(AssignmentServiceImpl::new(
        repo,
        probe,
        Arc::new(DefaultClock),
    )))
}

pub(crate) fn assignment_service_app(service: Arc<dyn AssignmentService>) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = AssignmentHttpState::new(service, CancellationToken::new());
    base_app()
        .app_data(web::Data::new(state))
        .service(web::scope("/api").configure(assignments::configure))
}

pub(crate) fn fixed_probe(parent: ParentKind, outcome: ExistenceOutcome) -> Arc<dyn ExistenceProbe> {
    Arc::new(FixedExistenceProbe::new(parent, outcome))
}

pub(crate) fn str_at<'a>(value: &'a Value, pointer: &str) -> Option<&'a str> {
    value.pointer(pointer).and_then(Value::as_str)
}
