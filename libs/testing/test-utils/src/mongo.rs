//! MongoDB test infrastructure
//!
//! Provides a `TestMongo` helper that starts a MongoDB container for testing.

use database::mongodb::{MongoConfig, MongoStore};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::mongo::Mongo;
use uuid::Uuid;

/// Test MongoDB wrapper that ensures proper cleanup
///
/// Each instance gets its own container and a uniquely named database. The
/// container is stopped and removed when this struct is dropped.
///
/// # Example
///
/// ```no_run
/// use test_utils::TestMongo;
///
/// # async fn example() {
/// let mongo = TestMongo::new().await;
/// let categories = mongo.store().collection::<mongodb::bson::Document>("categories");
/// # }
/// ```
pub struct TestMongo {
    #[allow(dead_code)]
    container: ContainerAsync<Mongo>,
    store: MongoStore,
    pub connection_string: String,
}

impl TestMongo {
    /// Start a MongoDB 7 container and connect to a fresh database
    pub async fn new() -> Self {
        let container = Mongo::default()
            .with_tag("7")
            .start()
            .await
            .expect("Failed to start MongoDB container");

        let host_port = container
            .get_host_port_ipv4(27017)
            .await
            .expect("Failed to get MongoDB port");

        let database = format!("test_{}", Uuid::new_v4().simple());
        let connection_string = format!("mongodb://127.0.0.1:{}/{}", host_port, database);

        let config = MongoConfig::new(connection_string.clone()).with_database(database);
        let store = MongoStore::connect(config, None)
            .await
            .expect("Failed to connect to MongoDB");

        tracing::info!(port = host_port, "Test MongoDB ready (mongo:7)");

        Self {
            container,
            store,
            connection_string,
        }
    }

    /// Cloned store handle (shares the connection pool)
    pub fn store(&self) -> MongoStore {
        self.store.clone()
    }

    pub fn connection_string(&self) -> &str {
        &self.connection_string
    }
}

impl Drop for TestMongo {
    fn drop(&mut self) {
        tracing::debug!("Cleaning up test MongoDB container");
    }
}
