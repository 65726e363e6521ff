use async_trait::async_trait;
use axum_helpers::page_offset;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::models::{Store, StoreFilter};

/// Repository trait for Store persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoreRepository: Send + Sync {
    async fn create(&self, store: Store) -> StoreResult<Store>;

    async fn get_by_id(&self, id: Uuid) -> StoreResult<Option<Store>>;

    async fn get_many(&self, ids: &[Uuid]) -> StoreResult<Vec<Store>>;

    /// Paged database listing, newest first
    async fn list(&self, filter: &StoreFilter) -> StoreResult<Vec<Store>>;

    async fn count(&self, filter: &StoreFilter) -> StoreResult<u64>;

    async fn replace(&self, store: Store) -> StoreResult<Store>;

    async fn delete(&self, id: Uuid) -> StoreResult<bool>;
}

/// In-memory implementation of StoreRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryStoreRepository {
    stores: Arc<RwLock<HashMap<Uuid, Store>>>,
}

impl InMemoryStoreRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn matches(store: &Store, filter: &StoreFilter) -> bool {
        if let Some(publish) = filter.publish {
            if store.publish != publish {
                return false;
            }
        }
        if let Some(ref search) = filter.search {
            let needle = search.to_lowercase();
            let hit = [&store.name, &store.address, &store.city, &store.province]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }
        true
    }
}

#[async_trait]
impl StoreRepository for InMemoryStoreRepository {
    async fn create(&self, store: Store) -> StoreResult<Store> {
        self.stores.write().await.insert(store.id, store.clone());
        tracing::info!(store_id = %store.id, "Created store");
        Ok(store)
    }

    async fn get_by_id(&self, id: Uuid) -> StoreResult<Option<Store>> {
        Ok(self.stores.read().await.get(&id).cloned())
    }

    async fn get_many(&self, ids: &[Uuid]) -> StoreResult<Vec<Store>> {
        let stores = self.stores.read().await;
        Ok(ids.iter().filter_map(|id| stores.get(id).cloned()).collect())
    }

    async fn list(&self, filter: &StoreFilter) -> StoreResult<Vec<Store>> {
        let stores = self.stores.read().await;
        let mut result: Vec<Store> = stores
            .values()
            .filter(|s| Self::matches(s, filter))
            .cloned()
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(result
            .into_iter()
            .skip(page_offset(filter.page, filter.limit) as usize)
            .take(filter.limit as usize)
            .collect())
    }

    async fn count(&self, filter: &StoreFilter) -> StoreResult<u64> {
        let stores = self.stores.read().await;
        Ok(stores.values().filter(|s| Self::matches(s, filter)).count() as u64)
    }

    async fn replace(&self, store: Store) -> StoreResult<Store> {
        let mut stores = self.stores.write().await;
        if !stores.contains_key(&store.id) {
            return Err(StoreError::NotFound(store.id));
        }
        stores.insert(store.id, store.clone());
        Ok(store)
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        Ok(self.stores.write().await.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StoreInput;

    fn store(name: &str, city: &str, publish: bool) -> Store {
        Store::new(StoreInput {
            name: name.into(),
            city: city.into(),
            publish,
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_search_matches_any_text_field() {
        let repo = InMemoryStoreRepository::new();
        repo.create(store("Outlet", "Bandung", true)).await.unwrap();
        repo.create(store("Flagship", "Jakarta", false)).await.unwrap();

        let filter = StoreFilter {
            search: Some("bandung".into()),
            ..Default::default()
        };
        assert_eq!(repo.count(&filter).await.unwrap(), 1);

        let filter = StoreFilter {
            publish: Some(false),
            ..Default::default()
        };
        let stores = repo.list(&filter).await.unwrap();
        assert_eq!(stores.len(), 1);
        assert_eq!(stores[0].name, "Flagship");
    }

    #[tokio::test]
    async fn test_replace_missing() {
        let repo = InMemoryStoreRepository::new();
        let err = repo.replace(store("Ghost", "", false)).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }
}
