//! # Axum Helpers
//!
//! Shared pieces for the HTTP services of the workspace.
//!
//! - **[`errors`]**: `AppError` and the standard JSON error body
//! - **[`extractors`]**: request extractors (validated JSON and query, numeric ids)
//! - **[`server`]**: router assembly, health endpoints, graceful shutdown

pub mod errors;
pub mod extractors;
pub mod server;

pub use errors::{AppError, ErrorCode, ErrorResponse};
pub use extractors::{IdPath, ValidatedJson, ValidatedQuery};
pub use server::{
    HealthCheckFuture, create_app, create_router, health_router, run_health_checks,
    shutdown_signal,
};
