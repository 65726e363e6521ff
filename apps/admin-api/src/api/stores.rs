//! Stores API routes

use axum::Router;
use domain_stores::{MongoStoreRepository, SEARCH_INDEX, StoreService, handlers};
use search::SearchMirror;
use tracing::info;

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let repository = MongoStoreRepository::new(&state.mongo);
    let mirror = SearchMirror::new(state.search.clone(), SEARCH_INDEX);

    handlers::router(StoreService::new(repository, mirror))
}

pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    MongoStoreRepository::new(&state.mongo)
        .init_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create store indexes: {}", e))?;
    info!("Store collection indexes created");
    Ok(())
}
