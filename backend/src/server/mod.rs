//! Server construction and middleware wiring.

mod config;
mod connection;
mod state_builders;

pub use config::ServerConfig;

use state_builders::{ServiceState, build_service_state};

use std::io;
use std::net::TcpListener;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use crate::Trace;
#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::error::{json_config, path_config};
use crate::inbound::http::health::health;
use crate::outbound::persistence::{DbPool, PoolConfig, RecordTable, run_migrations};
use crate::settings::ServiceKind;

fn build_app(
    state: ServiceState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(json_config())
        .app_data(path_config())
        .wrap(Trace)
        .service(web::scope("/api").configure(|cfg| state.configure(cfg)))
        .service(health);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server on an already bound listener.
///
/// `shutdown` is the root of every request's cancellation token; cancel it
/// to abandon in-flight existence probes. A client hanging up cancels the
/// requests of its own connection. The server does not install its own
/// signal handlers, see [`shutdown_on_signal`].
///
/// # Errors
/// Propagates [`std::io::Error`] when the role cannot be wired or the
/// listener cannot be adopted.
pub fn create_server_with_listener(
    config: ServerConfig,
    listener: TcpListener,
    shutdown: CancellationToken,
) -> io::Result<Server> {
    let state = build_service_state(&config, shutdown.clone())?;
    info!(
        service = config.service().as_str(),
        addr = ?listener.local_addr().ok(),
        "starting service"
    );
    let server = HttpServer::new(move || build_app(state.clone()))
        .on_connect(connection::watch_connections(shutdown))
        .disable_signals()
        .listen(listener)?
        .run();
    Ok(server)
}

/// Bind [`ServerConfig::bind_addr`] and construct the server.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket or starting the
/// server fails.
pub fn create_server(config: ServerConfig, shutdown: CancellationToken) -> io::Result<Server> {
    let listener = TcpListener::bind(config.bind_addr())?;
    create_server_with_listener(config, listener, shutdown)
}

/// Wait for SIGINT or SIGTERM, cancel `shutdown`, then stop `server`
/// gracefully.
pub async fn shutdown_on_signal(server: actix_web::dev::ServerHandle, shutdown: CancellationToken) {
    wait_for_signal().await;
    info!("shutdown signal received");
    shutdown.cancel();
    server.stop(true).await;
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    match signal(SignalKind::terminate()) {
        Ok(mut terminate) => {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {}
                _ = terminate.recv() => {}
            }
        }
        Err(err) => {
            warn!(error = %err, "SIGTERM handler unavailable; waiting for ctrl-c only");
            if let Err(err) = tokio::signal::ctrl_c().await {
                warn!(error = %err, "ctrl-c handler failed");
            }
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "ctrl-c handler failed");
    }
}

/// Build the connection pool for `service` and apply its migrations.
///
/// # Errors
/// Returns an error when migrations fail or the pool cannot be built.
pub async fn connect_database(
    service: ServiceKind,
    database_url: &str,
    migrate: bool,
) -> io::Result<DbPool> {
    if migrate {
        let url = database_url.to_owned();
        let table = match service {
            ServiceKind::User => RecordTable::Users,
            ServiceKind::Project => RecordTable::Projects,
            ServiceKind::Assignment => RecordTable::Assignments,
        };
        tokio::task::spawn_blocking(move || run_migrations(&url, table))
            .await
            .map_err(io::Error::other)?
            .map_err(io::Error::other)?;
    }
    DbPool::new(PoolConfig::new(database_url))
        .await
        .map_err(io::Error::other)
}
