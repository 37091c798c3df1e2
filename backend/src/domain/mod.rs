//! Domain layer: entities, the existence gate, and the service ports.
//!
//! Nothing here depends on Actix, Diesel or reqwest; adapters live under
//! `inbound` and `outbound` and meet the domain at the traits in [`ports`].

pub mod assignment;
pub mod creation;
pub(crate) mod entity_id;
pub mod error;
pub mod existence;
pub mod ports;
pub mod project;
pub mod services;
pub mod trace_id;
pub mod user;
pub mod validation;

pub use self::assignment::{
    Assignment, AssignmentId, AssignmentStatus, NewAssignment, UnknownStatusError,
};
pub use self::creation::{CreationError, CreationGate};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::existence::{
    Decision, ExistenceOutcome, ParentKind, ProbeCancelled, Unavailability, validate,
};
pub use self::project::{NewProject, Project, ProjectId};
pub use self::services::{AssignmentServiceImpl, ProjectServiceImpl, UserServiceImpl};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{NewUser, User, UserId};
pub use self::validation::FieldValidationError;

/// Convenience alias for results returned by driving ports.
pub type ApiResult<T> = Result<T, Error>;
