//! Builders for the per-role HTTP state.
//!
//! Each process serves exactly one role. The builder picks the record store
//! (Diesel when a pool is configured, in memory otherwise) and, for the
//! dependent roles, the HTTP existence probe pointed at the upstream.

use std::io;
use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use reqwest::Client;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::domain::ports::{
    AssignmentRepository, ExistenceProbe, ProjectRepository, UserRepository,
};
use crate::domain::{AssignmentServiceImpl, ParentKind, ProjectServiceImpl, UserServiceImpl};
use crate::inbound::http::state::{AssignmentHttpState, ProjectHttpState, UserHttpState};
use crate::inbound::http::{assignments, projects, users};
use crate::outbound::existence::{HttpExistenceProbe, build_upstream_client};
use crate::outbound::memory::{
    MemoryAssignmentRepository, MemoryProjectRepository, MemoryUserRepository,
};
use crate::outbound::persistence::{
    DbPool, DieselAssignmentRepository, DieselProjectRepository, DieselUserRepository,
};
use crate::settings::ServiceKind;

use super::ServerConfig;

/// Route state for the role this process serves.
#[derive(Clone)]
pub(crate) enum ServiceState {
    User(web::Data<UserHttpState>),
    Project(web::Data<ProjectHttpState>),
    Assignment(web::Data<AssignmentHttpState>),
}

impl ServiceState {
    /// Register the role's state and routes under the caller's scope.
    pub(crate) fn configure(&self, cfg: &mut web::ServiceConfig) {
        match self {
            Self::User(state) => {
                cfg.app_data(state.clone()).configure(users::configure);
            }
            Self::Project(state) => {
                cfg.app_data(state.clone()).configure(projects::configure);
            }
            Self::Assignment(state) => {
                cfg.app_data(state.clone()).configure(assignments::configure);
            }
        }
    }
}

/// Choose the Diesel repository when a pool exists, the in-memory one
/// otherwise.
fn pick_repository<T: ?Sized>(
    pool: &Option<DbPool>,
    diesel: impl FnOnce(DbPool) -> Arc<T>,
    memory: impl FnOnce() -> Arc<T>,
) -> Arc<T> {
    match pool {
        Some(pool) => diesel(pool.clone()),
        None => {
            warn!("no database configured; records are kept in memory");
            memory()
        }
    }
}

fn build_probe(
    config: &ServerConfig,
    client: &Client,
    expected: ParentKind,
) -> io::Result<Arc<dyn ExistenceProbe>> {
    let (parent, base_url) = config.upstream.clone().ok_or_else(|| {
        io::Error::other(format!(
            "the {} service needs an upstream {expected} service URL",
            config.service.as_str()
        ))
    })?;
    if parent != expected {
        return Err(io::Error::other(format!(
            "the {} service validates {expected} parents, not {parent}",
            config.service.as_str()
        )));
    }
    let probe = HttpExistenceProbe::new(client.clone(), base_url, parent)
        .map_err(|err| io::Error::other(err.to_string()))?;
    Ok(Arc::new(probe))
}

/// Build the route state for the configured role.
///
/// `shutdown` is the root token request cancellations derive from.
///
/// # Errors
///
/// Returns an error when a dependent role lacks a usable upstream or the
/// HTTP client cannot be built.
pub(crate) fn build_service_state(
    config: &ServerConfig,
    shutdown: CancellationToken,
) -> io::Result<ServiceState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    match config.service {
        ServiceKind::User => {
            let repo = pick_repository::<dyn UserRepository>(
                &config.db_pool,
                |pool| Arc::new(DieselUserRepository::new(pool)),
                || Arc::new(MemoryUserRepository::default()),
            );
            let service = UserServiceImpl::new(repo, clock);
            Ok(ServiceState::User(web::Data::new(UserHttpState::new(
                Arc::new(service),
            ))))
        }
        ServiceKind::Project => {
            let client = build_upstream_client().map_err(io::Error::other)?;
            let probe = build_probe(config, &client, ParentKind::User)?;
            let repo = pick_repository::<dyn ProjectRepository>(
                &config.db_pool,
                |pool| Arc::new(DieselProjectRepository::new(pool)),
                || Arc::new(MemoryProjectRepository::default()),
            );
            let service = ProjectServiceImpl::new(repo, probe, clock);
            Ok(ServiceState::Project(web::Data::new(ProjectHttpState::new(
                Arc::new(service),
                shutdown,
            ))))
        }
        ServiceKind::Assignment => {
            let client = build_upstream_client().map_err(io::Error::other)?;
            let probe = build_probe(config, &client, ParentKind::Project)?;
            let repo = pick_repository::<dyn AssignmentRepository>(
                &config.db_pool,
                |pool| Arc::new(DieselAssignmentRepository::new(pool)),
                || Arc::new(MemoryAssignmentRepository::default()),
            );
            let service = AssignmentServiceImpl::new(repo, probe, clock);
            Ok(ServiceState::Assignment(web::Data::new(
                AssignmentHttpState::new(Arc::new(service), shutdown),
            )))
        }
    }
}
