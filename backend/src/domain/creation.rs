//! Creation workflow for entities that reference an upstream parent.
//!
//! Every dependent create runs the same sequence: probe the parent, feed the
//! outcome through [`validate`], and persist only on
//! [`Decision::Proceed`]. [`CreationGate`] owns that sequence once; the
//! project and assignment services instantiate it with their own probe.

use std::future::Future;
use std::sync::Arc;

use serde_json::json;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::domain::ports::{ExistenceProbe, RecordStoreError};
use crate::domain::{Decision, Error, ParentKind, Unavailability, validate};

/// Why a dependent create did not persist anything.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreationError {
    /// The upstream confirmed the parent does not exist.
    #[error("{parent} {parent_id} does not exist")]
    ParentNotFound { parent: ParentKind, parent_id: i32 },
    /// The upstream could not confirm the parent either way.
    #[error("{parent} service unavailable while validating {parent_id}: {reason}")]
    ParentUnavailable {
        parent: ParentKind,
        parent_id: i32,
        reason: Unavailability,
    },
    /// The caller went away before validation finished.
    #[error("request cancelled before {parent} validation completed")]
    Cancelled { parent: ParentKind },
    /// Validation passed but the local store failed.
    #[error(transparent)]
    Persistence(#[from] RecordStoreError),
}

impl From<CreationError> for Error {
    fn from(value: CreationError) -> Self {
        match value {
            CreationError::ParentNotFound { parent, parent_id } => {
                Error::invalid_request(parent.missing_message()).with_details(json!({
                    "field": parent.reference_field(),
                    "code": "parent_not_found",
                    "parentId": parent_id,
                }))
            }
            CreationError::ParentUnavailable { parent, reason, .. } => {
                let status = reason.upstream_status();
                Error::service_unavailable(format!(
                    "{parent} service returned {status} while validating {}.",
                    parent.reference_field()
                ))
                .with_details(json!({
                    "upstreamStatus": status,
                    "reason": reason.reason_code(),
                }))
            }
            CreationError::Cancelled { .. } => {
                Error::service_unavailable("request cancelled before validation completed")
            }
            CreationError::Persistence(err) => match err {
                RecordStoreError::Connection { message } => {
                    Error::internal(format!("record store unavailable: {message}"))
                }
                RecordStoreError::Query { message } => {
                    Error::internal(format!("record store error: {message}"))
                }
            },
        }
    }
}

/// Probe-then-persist gate shared by every dependent service.
pub struct CreationGate<P: ?Sized> {
    probe: Arc<P>,
}

impl<P: ?Sized> Clone for CreationGate<P> {
    fn clone(&self) -> Self {
        Self {
            probe: Arc::clone(&self.probe),
        }
    }
}

impl<P> CreationGate<P>
where
    P: ExistenceProbe + ?Sized,
{
    pub fn new(probe: Arc<P>) -> Self {
        Self { probe }
    }

    /// Kind of parent this gate checks.
    pub fn parent(&self) -> ParentKind {
        self.probe.parent()
    }

    /// Probe `parent_id` and decide whether creation may proceed.
    pub async fn admit(
        &self,
        parent_id: i32,
        cancellation: &CancellationToken,
    ) -> Result<(), CreationError> {
        let parent = self.probe.parent();
        let outcome = match self.probe.probe(parent_id, cancellation).await {
            Ok(outcome) => outcome,
            Err(_) => {
                debug!(%parent, parent_id, "creation abandoned by caller");
                return Err(CreationError::Cancelled { parent });
            }
        };

        match validate(outcome) {
            Decision::Proceed => Ok(()),
            Decision::RejectNotFound => {
                info!(%parent, parent_id, "rejected creation: parent does not exist");
                Err(CreationError::ParentNotFound { parent, parent_id })
            }
            Decision::RejectUnavailable(reason) => {
                info!(%parent, parent_id, %reason, "rejected creation: parent unverifiable");
                Err(CreationError::ParentUnavailable {
                    parent,
                    parent_id,
                    reason,
                })
            }
        }
    }

    /// Run `persist` only once `parent_id` is confirmed.
    ///
    /// `persist` is not invoked on any rejection, so nothing reaches the
    /// store unless the upstream answered 200.
    pub async fn create<T, F, Fut>(
        &self,
        parent_id: i32,
        cancellation: &CancellationToken,
        persist: F,
    ) -> Result<T, CreationError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, RecordStoreError>>,
    {
        self.admit(parent_id, cancellation).await?;
        persist().await.map_err(|err| {
            error!(parent = %self.probe.parent(), parent_id, error = %err, "record store failed");
            CreationError::Persistence(err)
        })
    }
}

#[cfg(test)]
mod tests;
