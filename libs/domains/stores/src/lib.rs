//! Stores Domain
//!
//! Physical store locations with an optional `{lat, lon}` point. Records
//! live in MongoDB and are mirrored into `stores_index`, where listing
//! searches across name, address, city and province.

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{StoreError, StoreResult};
pub use handlers::ApiDoc;
pub use models::{
    COLLECTION, GeoPoint, SEARCH_INDEX, Store, StoreDocument, StoreFilter, StoreInput,
};
pub use mongodb::MongoStoreRepository;
pub use repository::{InMemoryStoreRepository, StoreRepository};
pub use service::StoreService;
