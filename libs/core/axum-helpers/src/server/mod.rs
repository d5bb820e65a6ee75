//! Server infrastructure: router assembly, health endpoints, and graceful shutdown.
//!
//! ```ignore
//! use axum_helpers::server::{create_router, health_router, serve, ShutdownCoordinator};
//! use core_config::app_info;
//!
//! let shutdown = ShutdownCoordinator::new();
//! let app = create_router::<ApiDoc>(api_routes).merge(health_router(app_info!()));
//!
//! let signal = shutdown.clone();
//! tokio::spawn(async move { signal.wait_for_signal().await });
//!
//! let stop = shutdown.clone();
//! serve(app, &server_config, async move { stop.cancelled().await }).await?;
//! ```

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{OPENAPI_PATH, create_router, serve};
pub use health::{HealthCheckFuture, HealthResponse, health_router, run_health_checks};
pub use shutdown::{ShutdownCoordinator, shutdown_signal};
