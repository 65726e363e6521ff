//! Products Domain
//!
//! Catalog entries with variants, discounts and image files. Images are
//! uploaded as multipart form data and stored through an [`ImageStorage`];
//! the product record keeps only the stored file names.
//!
//! Every write is mirrored into the `products_index` search index. Listing
//! goes through the index and falls back to MongoDB when it is unreachable.
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use database::mongodb::{MongoConfig, MongoStore};
//! use domain_products::{LocalImageStorage, MongoProductRepository, ProductService, SEARCH_INDEX, handlers};
//! use search::{ElasticsearchClient, SearchConfig, SearchMirror};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = MongoStore::connect(MongoConfig::new("mongodb://localhost:27017/shop"), None).await?;
//! let es = Arc::new(ElasticsearchClient::new(SearchConfig::new("http://localhost:9200"))?);
//!
//! let service = ProductService::new(
//!     MongoProductRepository::new(&store),
//!     SearchMirror::new(es, SEARCH_INDEX),
//!     Arc::new(LocalImageStorage::from_env()),
//! );
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod images;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use images::{ImageStorage, ImageUpload, InMemoryImageStorage, LocalImageStorage};
pub use models::{
    COLLECTION, Discount, DiscountType, Product, ProductDocument, ProductFilter, ProductInput,
    RemoveImages, SEARCH_INDEX, Variant, VariantAttribute,
};
pub use mongodb::MongoProductRepository;
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use service::ProductService;
