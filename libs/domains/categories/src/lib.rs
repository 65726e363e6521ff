//! Categories Domain
//!
//! Categories form a tree. Each record stores its `level`, the ids of its
//! `ancestors` (root first) and a `path` breadcrumb, computed from the parent
//! when the category is written.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐     ┌──────────────┐
//! │   Service   │ ──► │ SearchMirror │  ← best-effort index writes
//! └──────┬──────┘     └──────────────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← trait + MongoDB / in-memory implementations
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use database::mongodb::{MongoConfig, MongoStore};
//! use domain_categories::{CategoryService, MongoCategoryRepository, SEARCH_INDEX, handlers};
//! use search::{ElasticsearchClient, SearchConfig, SearchMirror};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = MongoStore::connect(MongoConfig::new("mongodb://localhost:27017/shop"), None).await?;
//! let es = Arc::new(ElasticsearchClient::new(SearchConfig::new("http://localhost:9200"))?);
//!
//! let service = CategoryService::new(
//!     MongoCategoryRepository::new(&store),
//!     SearchMirror::new(es, SEARCH_INDEX),
//! );
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod hierarchy;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod seo;
pub mod service;
pub mod slug;

pub use error::{CategoryError, CategoryResult};
pub use handlers::ApiDoc;
pub use hierarchy::Hierarchy;
pub use models::{
    COLLECTION, Category, CategoryDocument, CategoryFilter, CategoryInput, SEARCH_INDEX,
    SuggestionRequest, SuggestionResponse,
};
pub use mongodb::MongoCategoryRepository;
pub use repository::{CategoryRepository, InMemoryCategoryRepository};
pub use service::CategoryService;
