//! Database connectors.
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB connection store, health checks, retrying connect
//! - `config` - `core_config::FromEnv` for the connection settings
//!
//! ```ignore
//! use database::mongodb::{MongoConfig, MongoStore};
//!
//! let store = MongoStore::connect(MongoConfig::from_env()?, None).await?;
//! let categories = store.collection::<Category>("categories");
//! ```

pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;

pub use common::{DatabaseError, DatabaseResult, RetryConfig};
