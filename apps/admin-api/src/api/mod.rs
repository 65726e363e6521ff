//! API routes
//!
//! Nested under `/api` by `axum_helpers::create_router`.

pub mod assistant;
pub mod categories;
pub mod health;
pub mod products;
pub mod stores;
pub mod users;

use axum::Router;

use crate::state::AppState;

pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/categories", categories::router(state))
        .nest("/products", products::router(state))
        .nest("/stores", stores::router(state))
        .nest("/users", users::router(state))
        .nest("/auth", users::auth_router(state))
        .nest("/assistant", assistant::router(state))
        .merge(health::router(state.clone()))
}

/// Create MongoDB indexes for every collection.
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    categories::init_indexes(state).await?;
    products::init_indexes(state).await?;
    stores::init_indexes(state).await?;
    users::init_indexes(state).await?;
    Ok(())
}
