//! Service configuration loaded via OrthoConfig.
//!
//! Values are layered from CLI flags, `TASKBOARD_*` environment variables
//! and defaults. [`ServiceSettings::resolve`] checks the combination once at
//! startup so the server never starts half-configured.

use std::net::SocketAddr;
use std::str::FromStr;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::domain::ParentKind;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Which of the three services this process runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    User,
    Project,
    Assignment,
}

impl ServiceKind {
    /// Parent entity this service validates against, if any.
    pub const fn upstream_parent(self) -> Option<ParentKind> {
        match self {
            Self::User => None,
            Self::Project => Some(ParentKind::User),
            Self::Assignment => Some(ParentKind::Project),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Project => "project",
            Self::Assignment => "assignment",
        }
    }
}

impl FromStr for ServiceKind {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(Self::User),
            "project" => Ok(Self::Project),
            "assignment" => Ok(Self::Assignment),
            _ => Err(SettingsError::UnknownService {
                value: s.to_owned(),
            }),
        }
    }
}

/// Raw settings as layered by OrthoConfig.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TASKBOARD")]
pub struct ServiceSettings {
    /// Service role: `user`, `project` or `assignment`.
    pub service: Option<String>,
    /// Listener address.
    pub bind_addr: Option<String>,
    /// Base URL of the upstream service holding parent entities.
    pub upstream_url: Option<String>,
    /// PostgreSQL connection string; in-memory storage when absent.
    pub database_url: Option<String>,
    /// Apply embedded migrations at startup.
    #[ortho_config(default = true)]
    pub run_migrations: bool,
}

/// Startup configuration problems.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("TASKBOARD_SERVICE is required (user, project or assignment)")]
    MissingService,
    #[error("unknown service {value:?}; expected user, project or assignment")]
    UnknownService { value: String },
    #[error("invalid bind address {value:?}: {message}")]
    InvalidBindAddr { value: String, message: String },
    #[error("TASKBOARD_UPSTREAM_URL is required for the {service} service")]
    MissingUpstream { service: &'static str },
    #[error("invalid upstream URL {value:?}: {message}")]
    InvalidUpstream { value: String, message: String },
}

/// Upstream that a dependent service probes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamSettings {
    pub parent: ParentKind,
    pub base_url: Url,
}

/// Settings checked and ready for the composition root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSettings {
    pub service: ServiceKind,
    pub bind_addr: SocketAddr,
    pub upstream: Option<UpstreamSettings>,
    pub database_url: Option<String>,
    pub run_migrations: bool,
}

impl ServiceSettings {
    /// Validate the combination of values for the selected role.
    pub fn resolve(self) -> Result<ResolvedSettings, SettingsError> {
        let service: ServiceKind = self
            .service
            .as_deref()
            .ok_or(SettingsError::MissingService)?
            .parse()?;
        let raw_addr = self
            .bind_addr
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned());
        let bind_addr = raw_addr
            .parse()
            .map_err(|err: std::net::AddrParseError| SettingsError::InvalidBindAddr {
                message: err.to_string(),
                value: raw_addr.clone(),
            })?;

        let upstream = match service.upstream_parent() {
            None => None,
            Some(parent) => {
                let raw = self
                    .upstream_url
                    .filter(|value| !value.trim().is_empty())
                    .ok_or(SettingsError::MissingUpstream {
                        service: service.as_str(),
                    })?;
                Some(UpstreamSettings {
                    parent,
                    base_url: parse_upstream(&raw)?,
                })
            }
        };

        Ok(ResolvedSettings {
            service,
            bind_addr,
            upstream,
            database_url: self.database_url.filter(|value| !value.trim().is_empty()),
            run_migrations: self.run_migrations,
        })
    }
}

fn parse_upstream(raw: &str) -> Result<Url, SettingsError> {
    let invalid = |message: String| SettingsError::InvalidUpstream {
        value: raw.to_owned(),
        message,
    };
    let url = Url::parse(raw).map_err(|err| invalid(err.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme {other}"))),
    }
}
