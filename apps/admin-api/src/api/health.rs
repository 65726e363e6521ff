//! Readiness endpoint

use axum::{Router, extract::State, response::IntoResponse, routing::get};
use axum_helpers::{HealthCheckFuture, run_health_checks};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(readiness_check))
        .with_state(state)
}

/// Ready when both MongoDB and the search node answer a ping
async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let checks: Vec<(&str, HealthCheckFuture)> = vec![
        (
            "mongodb",
            Box::pin(async { state.mongo.ping().await.map_err(|e| e.to_string()) }),
        ),
        (
            "search",
            Box::pin(async { state.search.ping().await.map_err(|e| e.to_string()) }),
        ),
    ];

    run_health_checks(checks).await
}
