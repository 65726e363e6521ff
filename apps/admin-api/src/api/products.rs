//! Products API routes

use axum::Router;
use domain_products::{MongoProductRepository, ProductService, SEARCH_INDEX, handlers};
use search::SearchMirror;
use tracing::info;

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let repository = MongoProductRepository::new(&state.mongo);
    let mirror = SearchMirror::new(state.search.clone(), SEARCH_INDEX);

    handlers::router_with_upload_limit(
        ProductService::new(repository, mirror, state.images.clone()),
        state.config.upload_max_bytes,
    )
}

pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    MongoProductRepository::new(&state.mongo)
        .init_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create product indexes: {}", e))?;
    info!("Product collection indexes created");
    Ok(())
}
