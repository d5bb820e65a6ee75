//! Readiness endpoint

use axum::{Router, response::Response, routing::get};
use axum_helpers::{HealthCheckFuture, run_health_checks};
use database::postgres::{DatabaseConnection, check_health};

async fn ready(db: DatabaseConnection) -> Response {
    let database: HealthCheckFuture<'_> =
        Box::pin(async move { check_health(&db).await.map_err(|e| e.to_string()) });

    run_health_checks(vec![("database", database)]).await
}

/// `/ready` reports 503 until the database answers.
pub fn router(db: DatabaseConnection) -> Router {
    Router::new().route("/ready", get(move || ready(db.clone())))
}
