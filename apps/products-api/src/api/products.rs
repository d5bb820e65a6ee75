//! Product routes

use axum::Router;
use domain_products::{HttpProductGateway, ProductService, handlers};

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let service = ProductService::from_shared(state.store.clone());
    handlers::router(HttpProductGateway::http(service))
}
