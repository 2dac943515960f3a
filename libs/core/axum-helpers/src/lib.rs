//! # Axum Helpers
//!
//! Shared HTTP plumbing for the estate API.
//!
//! ## Modules
//!
//! - **[`server`]**: Router assembly, health checks, graceful shutdown
//! - **[`errors`]**: `AppError` and the `{success: false, ...}` error body
//! - **[`extractors`]**: Extractors that reject with `AppError` (UUID path, query, JSON, validated JSON)
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_production_app, create_router};
//! use core_config::server::ServerConfig;
//! use std::time::Duration;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let api_routes = Router::new(); // Add your routes
//!     let router = create_router::<ApiDoc>(api_routes)?;
//!     create_production_app(router, &ServerConfig::default(), Duration::from_secs(30), async {}).await
//! }
//! ```

pub mod errors;
pub mod extractors;
pub mod server;

pub use server::{
    API_PREFIX, HealthCheckFuture, HealthResponse, ReadyResponse, ShutdownCoordinator,
    create_production_app, create_router, health_router, run_health_checks,
    shutdown_signal,
};

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::{AppJson, AppQuery, UuidPath, ValidatedJson};
