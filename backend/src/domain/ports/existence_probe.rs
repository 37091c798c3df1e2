//! Driven port for asking an upstream service whether a parent exists.
//!
//! Adapters must honour the caller's cancellation token: once it fires the
//! probe returns [`ProbeCancelled`] instead of an outcome. A probe never
//! returns an error for upstream trouble; that is reported as
//! [`ExistenceOutcome::Unavailable`] so the gate can decide on it.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::domain::{ExistenceOutcome, ParentKind, ProbeCancelled};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExistenceProbe: Send + Sync {
    /// Kind of parent this probe checks.
    fn parent(&self) -> ParentKind;

    /// Ask the upstream whether `parent_id` exists.
    ///
    /// Issues at most one upstream request and never retries.
    async fn probe(
        &self,
        parent_id: i32,
        cancellation: &CancellationToken,
    ) -> Result<ExistenceOutcome, ProbeCancelled>;
}

/// Probe that always reports the same outcome.
///
/// Useful for wiring HTTP handlers in tests without an upstream.
#[derive(Debug, Clone)]
pub struct FixedExistenceProbe {
    parent: ParentKind,
    outcome: ExistenceOutcome,
}

impl FixedExistenceProbe {
    pub fn new(parent: ParentKind, outcome: ExistenceOutcome) -> Self {
        Self { parent, outcome }
    }
}

#[async_trait]
impl ExistenceProbe for FixedExistenceProbe {
    fn parent(&self) -> ParentKind {
        self.parent
    }

    async fn probe(
        &self,
        _parent_id: i32,
        cancellation: &CancellationToken,
    ) -> Result<ExistenceOutcome, ProbeCancelled> {
        if cancellation.is_cancelled() {
            return Err(ProbeCancelled);
        }
        Ok(self.outcome.clone())
    }
}
