//! HTTP surface for the memcore resolution pipeline.
//!
//! Thin presentation over the core crates: one resolve endpoint, a record
//! fetch, key issuance, and the usual health/metrics plumbing. All decision
//! logic lives in `resolver`; this crate only authenticates, rate-limits,
//! deserializes, and maps errors onto status codes.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use crate::config::{ApiKeyEntry, ServerConfig};
pub use crate::error::{ServerError, ServerResult};
pub use crate::server::{build_router, start_server};
pub use crate::state::ServerState;
