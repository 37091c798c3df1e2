//! PostgreSQL record stores using Diesel.
//!
//! Repository implementations only translate between Diesel rows and domain
//! types; they hold no business logic. Row structs (`models.rs`) and table
//! definitions (`schema.rs`) never leave this module.
//!
//! ```ignore
//! use taskboard::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/taskboard")).await?;
//! let repo = DieselUserRepository::new(pool);
//! ```

mod diesel_assignment_repository;
mod diesel_basic_error_mapping;
mod diesel_project_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_assignment_repository::DieselAssignmentRepository;
pub use diesel_project_repository::DieselProjectRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{RecordTable, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
