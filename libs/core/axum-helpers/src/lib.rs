//! # Axum Helpers
//!
//! Shared building blocks for the HTTP surface of the catalog services.
//!
//! - **[`server`]**: router assembly, health checks, graceful shutdown
//! - **[`errors`]**: structured error responses with error codes
//! - **[`extractors`]**: validated JSON body and query extractors
//!
//! ```ignore
//! use axum_helpers::server::{create_router, serve, shutdown_signal};
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! let router = create_router::<ApiDoc>(api_routes);
//! serve(router, &server_config, shutdown_signal()).await?;
//! ```

pub mod errors;
pub mod extractors;
pub mod server;

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::{ValidatedJson, ValidatedQuery};

pub use server::{
    HealthCheckFuture, HealthResponse, OPENAPI_PATH, ShutdownCoordinator, create_router,
    health_router, run_health_checks, serve, shutdown_signal,
};
