//! Store Service - CRUD with search mirroring

use axum_helpers::Paginated;
use search::{SearchMirror, SearchQuery, order_by_ids};
use std::sync::Arc;
use tracing::{instrument, warn};
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::models::{Store, StoreDocument, StoreFilter, StoreInput};
use crate::repository::StoreRepository;

const SEARCH_FIELDS: &[&str] = &["name", "address", "city", "province"];

pub struct StoreService<R: StoreRepository> {
    repository: Arc<R>,
    search: SearchMirror,
}

impl<R: StoreRepository> StoreService<R> {
    pub fn new(repository: R, search: SearchMirror) -> Self {
        Self {
            repository: Arc::new(repository),
            search,
        }
    }

    #[instrument(skip(self))]
    pub async fn list_stores(&self, filter: StoreFilter) -> StoreResult<Paginated<Store>> {
        let query = SearchQuery::new()
            .text(filter.search.as_deref(), SEARCH_FIELDS)
            .term_opt("publish", filter.publish)
            .paginate(filter.page, filter.limit);

        match self.search.search(&query).await {
            Ok(hits) => {
                let ids: Vec<Uuid> = hits.parsed_ids();
                let records = self.repository.get_many(&ids).await?;
                Ok(Paginated::new(
                    filter.page,
                    filter.limit,
                    hits.total,
                    order_by_ids(&ids, records, |s| s.id),
                ))
            }
            Err(e) => {
                warn!(error = %e, "Store search unavailable, listing from database");
                let total = self.repository.count(&filter).await?;
                let records = self.repository.list(&filter).await?;
                Ok(Paginated::new(filter.page, filter.limit, total, records))
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn get_store(&self, id: Uuid) -> StoreResult<Store> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(StoreError::NotFound(id))
    }

    #[instrument(skip(self, input), fields(store_name = %input.name))]
    pub async fn create_store(&self, input: StoreInput) -> StoreResult<Store> {
        let store = self.repository.create(Store::new(input)).await?;
        self.search
            .index_document(&store.id.to_string(), &StoreDocument::from(&store))
            .await;
        Ok(store)
    }

    #[instrument(skip(self, input))]
    pub async fn update_store(&self, id: Uuid, input: StoreInput) -> StoreResult<Store> {
        let mut store = self.get_store(id).await?;
        store.replace_with(input);

        let store = self.repository.replace(store).await?;
        self.search
            .upsert_document(&store.id.to_string(), &StoreDocument::from(&store))
            .await;
        Ok(store)
    }

    #[instrument(skip(self))]
    pub async fn delete_store(&self, id: Uuid) -> StoreResult<()> {
        if !self.repository.delete(id).await? {
            return Err(StoreError::NotFound(id));
        }
        self.search.remove(&id.to_string()).await;
        Ok(())
    }
}

impl<R: StoreRepository> Clone for StoreService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            search: self.search.clone(),
        }
    }
}
