use axum::Router;
use axum_helpers::server::{create_production_app, health_router};
use core_ai::{ContentGenerator, GeminiClient};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::mongodb::MongoStore;
use domain_products::{ImageStorage, LocalImageStorage, images::UPLOAD_SUBDIR};
use search::{ElasticsearchClient, SearchIndex};
use std::sync::Arc;
use tower_http::services::ServeDir;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment);

    info!("Connecting to MongoDB at {}", config.mongodb.redacted_url());
    let mongo = MongoStore::connect(config.mongodb.clone(), None).await?;
    info!(
        "Successfully connected to MongoDB database: {}",
        config.mongodb.database()
    );

    let search: Arc<dyn SearchIndex> = Arc::new(ElasticsearchClient::new(config.search.clone())?);
    if let Err(e) = search.ping().await {
        // Writes still succeed without the index; lists fall back to MongoDB.
        tracing::warn!("Search node {} unreachable at startup: {}", config.search.node, e);
    }

    let generator: Option<Arc<dyn ContentGenerator>> = match config.gemini.clone() {
        Some(gemini) => {
            let client = GeminiClient::new(gemini)?;
            info!("AI features enabled with model {}", client.model());
            let client: Arc<dyn ContentGenerator> = Arc::new(client);
            Some(client)
        }
        None => {
            tracing::warn!("GEMINI_API_KEY is not set; AI endpoints will answer 503");
            None
        }
    };

    let image_storage = LocalImageStorage::from_env();
    let upload_dir = image_storage.dir().clone();
    let images: Arc<dyn ImageStorage> = Arc::new(image_storage);

    let state = AppState {
        config,
        mongo,
        search,
        generator,
        images,
    };

    api::init_indexes(&state).await?;

    let api_routes = api::routes(&state);

    let router =
        axum_helpers::create_router::<openapi::ApiDoc>(api_routes, state.config.server.static_dir.clone())
            .await?;

    let app = router
        .merge(health_router(state.config.app))
        .merge(Router::new().nest_service(&format!("/{UPLOAD_SUBDIR}"), ServeDir::new(upload_dir)));

    info!(
        "Starting {} v{} (shutdown timeout {:?})",
        state.config.app.name,
        state.config.app.version,
        state.config.server.shutdown_timeout()
    );

    let mongo = state.mongo.clone();
    create_production_app(app, &state.config.server, async move {
        info!("Shutting down: closing MongoDB connections");
        mongo.shutdown().await;
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Admin API shutdown complete");
    Ok(())
}
