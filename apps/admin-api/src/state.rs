//! Shared application state.
//!
//! Connection objects are built once in `main`; every domain router gets its
//! repository and search mirror from here.

use core_ai::ContentGenerator;
use database::mongodb::MongoStore;
use domain_products::ImageStorage;
use search::SearchIndex;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    /// MongoDB connection (cloneable, shares the driver pool)
    pub mongo: MongoStore,
    pub search: Arc<dyn SearchIndex>,
    /// Absent when no AI provider is configured
    pub generator: Option<Arc<dyn ContentGenerator>>,
    pub images: Arc<dyn ImageStorage>,
}
