//! Existence probe adapters.
//!
//! This module provides the reqwest implementation of the `ExistenceProbe`
//! port used by the project and assignment services.

mod http_probe;

pub use http_probe::{
    EXISTENCE_PROBE_TIMEOUT, HttpExistenceProbe, UpstreamUrlError, build_upstream_client,
};
