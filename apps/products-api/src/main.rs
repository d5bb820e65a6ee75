//! Products API - HTTP and NATS RPC server

use axum_helpers::{ShutdownCoordinator, create_router, health_router, serve};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres;
use domain_products::{ProductMessageHandler, ProductService, ProductStore, RpcProductGateway};
use migration::Migrator;
use std::sync::Arc;
use tracing::info;

mod api;
mod config;
mod openapi;
mod rpc;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!("Connecting to PostgreSQL");
    let db = postgres::connect_from_config_with_retry(config.postgres.clone(), None).await?;
    postgres::run_migrations::<Migrator>(&db, config.app.name).await?;

    let state = AppState::new(config, db);
    state.store.connect().await?;

    let nats = rpc::connect(&state.config.rpc, state.config.app.name).await?;
    let message_handler = Arc::new(ProductMessageHandler::new(RpcProductGateway::rpc(
        ProductService::from_shared(state.store.clone()),
    )));

    // Build REST router
    let router = create_router::<openapi::ApiDoc>(api::routes(&state))
        .merge(health_router(state.config.app))
        .merge(api::health::router(state.db.clone()));

    let coordinator = ShutdownCoordinator::new();
    let signals = coordinator.clone();
    tokio::spawn(async move { signals.wait_for_signal().await });

    info!(
        "Starting {} v{} on port {}, RPC subjects {}",
        state.config.app.name,
        state.config.app.version,
        state.config.server.port,
        state.config.rpc.wildcard_subject()
    );

    let http_shutdown = coordinator.clone();
    let http = async {
        let result = serve(router, &state.config.server, async move {
            http_shutdown.cancelled().await
        })
        .await
        .map_err(|e| eyre::eyre!("Server error: {}", e));
        coordinator.shutdown();
        result
    };
    let listener = async {
        let result = rpc::run(
            nats,
            state.config.rpc.clone(),
            message_handler,
            coordinator.clone(),
        )
        .await;
        // either side stopping stops the other
        coordinator.shutdown();
        result
    };

    // both sides drain before the pool closes
    let (http_result, rpc_result) = tokio::join!(http, listener);

    info!("Shutting down: closing PostgreSQL connections");
    state.store.disconnect().await?;
    http_result?;
    rpc_result?;

    info!("Products API shutdown complete");
    Ok(())
}
