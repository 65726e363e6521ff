use mongodb::{Client, Collection, Database};
use std::sync::Arc;

use super::{HealthStatus, MongoConfig, check_health_detailed, connect_from_config_with_retry};
use crate::common::{DatabaseError, DatabaseResult, RetryConfig};

/// The process-wide MongoDB connection.
///
/// Built once in `main` and handed to every repository; cloning shares the
/// driver's connection pool.
#[derive(Clone, Debug)]
pub struct MongoStore {
    client: Client,
    db: Database,
    config: Arc<MongoConfig>,
}

impl MongoStore {
    /// Connect with retry and select the configured database.
    pub async fn connect(config: MongoConfig, retry: Option<RetryConfig>) -> DatabaseResult<Self> {
        let client = connect_from_config_with_retry(&config, retry).await?;
        Ok(Self::from_client(client, config))
    }

    /// Wrap an existing client (tests, custom options).
    pub fn from_client(client: Client, config: MongoConfig) -> Self {
        let db = client.database(config.database());
        Self {
            client,
            db,
            config: Arc::new(config),
        }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn config(&self) -> &MongoConfig {
        &self.config
    }

    /// Typed handle to a named collection.
    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection::<T>(name)
    }

    pub async fn ping(&self) -> DatabaseResult<()> {
        let status = self.health().await;
        if status.healthy {
            Ok(())
        } else {
            Err(DatabaseError::HealthCheckFailed(
                status.message.unwrap_or_else(|| "ping failed".to_string()),
            ))
        }
    }

    pub async fn health(&self) -> HealthStatus {
        check_health_detailed(&self.db).await
    }

    /// Close pooled connections; in-flight operations are allowed to finish.
    pub async fn shutdown(self) {
        self.client.shutdown().await;
        tracing::info!("MongoDB connections closed");
    }
}
