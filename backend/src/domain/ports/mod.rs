//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (record stores, the existence probe) are implemented by
//! outbound adapters. Driving ports (the three services) are what inbound
//! HTTP handlers call.

mod macros;
pub(crate) use macros::define_port_error;

mod assignment_service;
mod existence_probe;
mod project_service;
mod record_store;
mod user_service;

#[cfg(test)]
pub use assignment_service::MockAssignmentService;
pub use assignment_service::AssignmentService;
#[cfg(test)]
pub use existence_probe::MockExistenceProbe;
pub use existence_probe::{ExistenceProbe, FixedExistenceProbe};
#[cfg(test)]
pub use project_service::MockProjectService;
pub use project_service::ProjectService;
#[cfg(test)]
pub use record_store::{MockAssignmentRepository, MockProjectRepository, MockUserRepository};
pub use record_store::{AssignmentRepository, ProjectRepository, RecordStoreError, UserRepository};
#[cfg(test)]
pub use user_service::MockUserService;
pub use user_service::UserService;
