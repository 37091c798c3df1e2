//! Outbound adapters implementing domain ports.
//!
//! - **existence**: reqwest-backed probe asking an upstream service whether
//!   a parent entity exists
//! - **persistence**: PostgreSQL record stores using Diesel
//! - **memory**: in-memory record stores for development and tests
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod existence;
pub mod memory;
pub mod persistence;
