//! API routes module

pub mod health;
pub mod products;

use axum::Router;

use crate::state::AppState;

/// Domain routes, nested under `/api` by `create_router`
pub fn routes(state: &AppState) -> Router {
    Router::new().nest("/products", products::router(state))
}
