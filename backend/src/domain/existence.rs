//! Existence outcomes and the validation gate.
//!
//! A dependent entity may only be created once its parent, owned by an
//! upstream service, has been confirmed to exist. The existence probe port
//! reports what the upstream said as an [`ExistenceOutcome`]; [`validate`]
//! turns that into the [`Decision`] the creation workflow acts on. The
//! mapping is pure so the decision policy is testable without any network.

use std::fmt;

use thiserror::Error;

/// Upstream-owned entity kinds that dependants reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParentKind {
    /// Users, referenced by projects through `ownerUserId`.
    User,
    /// Projects, referenced by assignments through `projectId`.
    Project,
}

impl ParentKind {
    /// Entity name as used in the upstream's routes (`/api/<name>/{id}`).
    pub const fn entity_name(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Project => "Project",
        }
    }

    /// Request field carrying the reference.
    pub const fn reference_field(self) -> &'static str {
        match self {
            Self::User => "ownerUserId",
            Self::Project => "projectId",
        }
    }

    /// Client-facing message when the parent is confirmed absent.
    pub const fn missing_message(self) -> &'static str {
        match self {
            Self::User => "Owner user does not exist.",
            Self::Project => "Project does not exist.",
        }
    }
}

impl fmt::Display for ParentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.entity_name())
    }
}

/// Why the upstream could not give a usable answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unavailability {
    /// The upstream answered with a status other than 200 or 404.
    UnexpectedStatus(u16),
    /// The local probe timeout elapsed before an answer arrived.
    TimedOut,
    /// The request failed below HTTP (refused, reset, DNS).
    Transport(String),
}

impl Unavailability {
    /// Status code reported to clients for diagnosis.
    ///
    /// Timeouts report `408` and transport faults `503`, since no upstream
    /// status was received in either case.
    pub const fn upstream_status(&self) -> u16 {
        match self {
            Self::UnexpectedStatus(status) => *status,
            Self::TimedOut => 408,
            Self::Transport(_) => 503,
        }
    }

    /// Stable machine-readable reason.
    pub const fn reason_code(&self) -> &'static str {
        match self {
            Self::UnexpectedStatus(_) => "unexpected_status",
            Self::TimedOut => "timeout",
            Self::Transport(_) => "transport",
        }
    }
}

impl fmt::Display for Unavailability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedStatus(status) => write!(f, "upstream responded with status {status}"),
            Self::TimedOut => f.write_str("upstream did not respond before the probe timeout"),
            Self::Transport(message) => write!(f, "upstream transport failure: {message}"),
        }
    }
}

/// What one existence probe learnt about a parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExistenceOutcome {
    /// The upstream answered 200.
    Confirmed,
    /// The upstream answered 404.
    NotFound,
    /// No trustworthy answer could be obtained.
    Unavailable(Unavailability),
}

/// The caller's own cancellation fired before the probe finished.
///
/// Returned instead of an outcome: the caller is no longer waiting, so no
/// decision is made on its behalf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("existence probe cancelled by the caller")]
pub struct ProbeCancelled;

/// Creation decision derived from an [`ExistenceOutcome`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// The parent exists; persistence may go ahead.
    Proceed,
    /// The parent does not exist; the request is a client error.
    RejectNotFound,
    /// The upstream could not answer; the request may be retried later.
    RejectUnavailable(Unavailability),
}

/// Map a probe outcome onto a creation decision.
///
/// # Examples
/// ```
/// use taskboard::domain::{Decision, ExistenceOutcome, Unavailability, validate};
///
/// assert_eq!(validate(ExistenceOutcome::Confirmed), Decision::Proceed);
/// assert_eq!(
///     validate(ExistenceOutcome::Unavailable(Unavailability::TimedOut)),
///     Decision::RejectUnavailable(Unavailability::TimedOut),
/// );
/// ```
#[must_use]
pub fn validate(outcome: ExistenceOutcome) -> Decision {
    match outcome {
        ExistenceOutcome::Confirmed => Decision::Proceed,
        ExistenceOutcome::NotFound => Decision::RejectNotFound,
        ExistenceOutcome::Unavailable(reason) => Decision::RejectUnavailable(reason),
    }
}
