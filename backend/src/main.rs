//! Service entry-point: loads settings, wires the configured role and serves
//! it until SIGINT or SIGTERM.

use std::io;

use ortho_config::OrthoConfig;
use tokio_util::sync::CancellationToken;
use tracing::{error, warn};
use tracing_subscriber::{EnvFilter, fmt};

use taskboard::server::{ServerConfig, connect_database, create_server, shutdown_on_signal};
use taskboard::settings::ServiceSettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServiceSettings::load()
        .map_err(|err| fail(format!("failed to load settings: {err}")))?
        .resolve()
        .map_err(|err| fail(err.to_string()))?;

    let mut config = ServerConfig::from_settings(&settings);
    if let Some(url) = settings.database_url.as_deref() {
        let pool = connect_database(settings.service, url, settings.run_migrations)
            .await
            .map_err(|err| fail(format!("database setup failed: {err}")))?;
        config = config.with_db_pool(pool);
    }

    let shutdown = CancellationToken::new();
    let server = create_server(config, shutdown.clone())?;
    tokio::spawn(shutdown_on_signal(server.handle(), shutdown));
    server.await
}

fn fail(message: String) -> io::Error {
    error!(%message, "startup aborted");
    io::Error::other(message)
}
