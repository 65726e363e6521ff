//! Categories API routes

use axum::Router;
use domain_categories::{CategoryService, MongoCategoryRepository, SEARCH_INDEX, handlers};
use search::SearchMirror;
use tracing::info;

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let repository = MongoCategoryRepository::new(&state.mongo);
    let mirror = SearchMirror::new(state.search.clone(), SEARCH_INDEX);

    let mut service = CategoryService::new(repository, mirror);
    if let Some(generator) = &state.generator {
        service = service.with_generator(generator.clone());
    }

    handlers::router(service)
}

pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    MongoCategoryRepository::new(&state.mongo)
        .init_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create category indexes: {}", e))?;
    info!("Category collection indexes created");
    Ok(())
}
