//! Reqwest-backed existence probe.
//!
//! This adapter owns transport details only: building the parent's URL,
//! racing the request against the caller's cancellation and the local
//! timeout, and classifying the status code. The response body is never
//! read.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::domain::ports::ExistenceProbe;
use crate::domain::{
    ExistenceOutcome, ParentKind, ProbeCancelled, TRACE_ID_HEADER, TraceId, Unavailability,
};

/// Upper bound on a single existence probe, measured from the start of the
/// probe rather than from when the request leaves.
pub const EXISTENCE_PROBE_TIMEOUT: Duration = Duration::from_secs(2);

const USER_AGENT: &str = concat!("taskboard/", env!("CARGO_PKG_VERSION"));

/// Build the HTTP client shared by every probe in the process.
///
/// No request timeout is configured here; each probe applies
/// [`EXISTENCE_PROBE_TIMEOUT`] itself so it can tell a timeout apart from
/// caller cancellation.
///
/// # Errors
///
/// Returns an error when the reqwest client cannot be constructed.
pub fn build_upstream_client() -> Result<Client, reqwest::Error> {
    Client::builder().user_agent(USER_AGENT).build()
}

/// Rejected upstream base URL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpstreamUrlError {
    #[error("upstream URL must use http or https, got `{scheme}`")]
    UnsupportedScheme { scheme: String },
    #[error("upstream URL `{url}` cannot carry a path")]
    CannotBeABase { url: String },
}

/// Existence probe that issues `GET <base>/api/<Parent>/{id}`.
#[derive(Debug, Clone)]
pub struct HttpExistenceProbe {
    client: Client,
    base_url: Url,
    parent: ParentKind,
}

impl HttpExistenceProbe {
    /// Build a probe for `parent` entities served under `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamUrlError`] when `base_url` is not an http(s) URL.
    pub fn new(client: Client, base_url: Url, parent: ParentKind) -> Result<Self, UpstreamUrlError> {
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(UpstreamUrlError::UnsupportedScheme {
                scheme: base_url.scheme().to_owned(),
            });
        }
        if base_url.cannot_be_a_base() {
            return Err(UpstreamUrlError::CannotBeABase {
                url: base_url.to_string(),
            });
        }
        Ok(Self {
            client,
            base_url,
            parent,
        })
    }

    fn resource_url(&self, parent_id: i32) -> Url {
        let mut url = self.base_url.clone();
        let id = parent_id.to_string();
        // `new` rejected cannot-be-a-base URLs, so segments are available.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["api", self.parent.entity_name(), id.as_str()]);
        }
        url
    }

    async fn send(&self, parent_id: i32) -> ExistenceOutcome {
        let mut request = self
            .client
            .get(self.resource_url(parent_id))
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(trace_id) = TraceId::current() {
            request = request.header(TRACE_ID_HEADER, trace_id.to_string());
        }
        match request.send().await {
            Ok(response) => classify_status(response.status()),
            Err(error) => map_transport_error(error),
        }
    }
}

#[async_trait]
impl ExistenceProbe for HttpExistenceProbe {
    fn parent(&self) -> ParentKind {
        self.parent
    }

    async fn probe(
        &self,
        parent_id: i32,
        cancellation: &CancellationToken,
    ) -> Result<ExistenceOutcome, ProbeCancelled> {
        let parent = self.parent;
        if cancellation.is_cancelled() {
            debug!(%parent, parent_id, "caller cancelled before probe was sent");
            return Err(ProbeCancelled);
        }

        // Biased so a caller cancellation racing the timeout is reported as
        // cancellation, never as `TimedOut`.
        let outcome = tokio::select! {
            biased;
            () = cancellation.cancelled() => {
                debug!(%parent, parent_id, "caller cancelled in-flight probe");
                return Err(ProbeCancelled);
            }
            () = tokio::time::sleep(EXISTENCE_PROBE_TIMEOUT) => {
                ExistenceOutcome::Unavailable(Unavailability::TimedOut)
            }
            outcome = self.send(parent_id) => outcome,
        };

        match &outcome {
            ExistenceOutcome::Unavailable(reason) => {
                warn!(%parent, parent_id, %reason, "parent existence could not be confirmed");
            }
            other => debug!(%parent, parent_id, outcome = ?other, "probed parent existence"),
        }
        Ok(outcome)
    }
}

fn classify_status(status: StatusCode) -> ExistenceOutcome {
    match status {
        StatusCode::OK => ExistenceOutcome::Confirmed,
        StatusCode::NOT_FOUND => ExistenceOutcome::NotFound,
        other => ExistenceOutcome::Unavailable(Unavailability::UnexpectedStatus(other.as_u16())),
    }
}

fn map_transport_error(error: reqwest::Error) -> ExistenceOutcome {
    if error.is_timeout() {
        ExistenceOutcome::Unavailable(Unavailability::TimedOut)
    } else {
        ExistenceOutcome::Unavailable(Unavailability::Transport(error.to_string()))
    }
}
