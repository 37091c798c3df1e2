//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use url::Url;

use crate::domain::ParentKind;
use crate::outbound::persistence::DbPool;
use crate::settings::{ResolvedSettings, ServiceKind};

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) service: ServiceKind,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) upstream: Option<(ParentKind, Url)>,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Configuration for `service` listening on `bind_addr`, with in-memory
    /// storage and no upstream.
    #[must_use]
    pub fn new(service: ServiceKind, bind_addr: SocketAddr) -> Self {
        Self {
            service,
            bind_addr,
            upstream: None,
            db_pool: None,
        }
    }

    /// Seed the configuration from validated settings.
    ///
    /// The database pool is attached separately once it has been built.
    #[must_use]
    pub fn from_settings(settings: &ResolvedSettings) -> Self {
        let config = Self::new(settings.service, settings.bind_addr);
        match &settings.upstream {
            Some(upstream) => config.with_upstream(upstream.parent, upstream.base_url.clone()),
            None => config,
        }
    }

    /// Point the existence probe at the service owning `parent` entities.
    #[must_use]
    pub fn with_upstream(mut self, parent: ParentKind, base_url: Url) -> Self {
        self.upstream = Some((parent, base_url));
        self
    }

    /// Attach a database connection pool for the record store.
    ///
    /// Without one the service keeps its records in memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    #[must_use]
    pub fn service(&self) -> ServiceKind {
        self.service
    }
}
