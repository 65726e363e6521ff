//! MongoDB connection management.

mod config;
mod connector;
mod errors;
mod health;
mod ids;
mod query;
mod store;

pub use config::{MongoConfig, database_from_url};
pub use connector::{connect_from_config, connect_from_config_with_retry};
pub use errors::{duplicate_key_field, is_duplicate_key};
pub use health::{HealthStatus, check_health, check_health_detailed};
pub use ids::{id_filter, uuid_to_bson, uuids_to_bson};
pub use query::{contains_any, regex_escape};
pub use store::MongoStore;

// Re-export MongoDB types for convenience
pub use mongodb::{Client, Collection, Database};
