//! Users and login routes
//!
//! `/users` and `/auth` share one service over the users collection.

use axum::Router;
use domain_users::{MongoUserRepository, SEARCH_INDEX, UserService, handlers};
use search::SearchMirror;
use tracing::info;

use crate::state::AppState;

fn service(state: &AppState) -> UserService<MongoUserRepository> {
    let repository = MongoUserRepository::new(&state.mongo);
    let mirror = SearchMirror::new(state.search.clone(), SEARCH_INDEX);
    UserService::new(repository, mirror)
}

pub fn router(state: &AppState) -> Router {
    handlers::router(service(state))
}

pub fn auth_router(state: &AppState) -> Router {
    handlers::auth_router(service(state))
}

pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    MongoUserRepository::new(&state.mongo)
        .init_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create user indexes: {}", e))?;
    info!("User collection indexes created");
    Ok(())
}
