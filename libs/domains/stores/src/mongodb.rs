//! MongoDB implementation of StoreRepository

use async_trait::async_trait;
use axum_helpers::page_offset;
use database::mongodb::{MongoStore, contains_any, id_filter, uuids_to_bson};
use futures_util::TryStreamExt;
use mongodb::{
    Collection, IndexModel,
    bson::{Document, doc},
    options::{FindOptions, IndexOptions},
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::models::{COLLECTION, Store, StoreFilter};
use crate::repository::StoreRepository;

const TEXT_FIELDS: &[&str] = &["name", "address", "city", "province"];

pub struct MongoStoreRepository {
    collection: Collection<Store>,
}

impl MongoStoreRepository {
    pub fn new(store: &MongoStore) -> Self {
        Self {
            collection: store.collection::<Store>(COLLECTION),
        }
    }

    pub async fn init_indexes(&self) -> StoreResult<()> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "name": 1 })
                .options(IndexOptions::builder().name("idx_name".to_string()).build())
                .build(),
            IndexModel::builder()
                .keys(doc! { "publish": 1, "created_at": -1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_publish_created".to_string())
                        .build(),
                )
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Store indexes created successfully");
        Ok(())
    }

    fn build_filter(filter: &StoreFilter) -> Document {
        let mut doc = doc! {};

        if let Some(publish) = filter.publish {
            doc.insert("publish", publish);
        }
        if let Some(ref search) = filter.search {
            doc.extend(contains_any(TEXT_FIELDS, search));
        }

        doc
    }
}

#[async_trait]
impl StoreRepository for MongoStoreRepository {
    #[instrument(skip(self, store), fields(store_id = %store.id))]
    async fn create(&self, store: Store) -> StoreResult<Store> {
        self.collection.insert_one(&store).await?;
        tracing::info!("Store created successfully");
        Ok(store)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> StoreResult<Option<Store>> {
        Ok(self.collection.find_one(id_filter(id)).await?)
    }

    #[instrument(skip(self, ids), fields(count = ids.len()))]
    async fn get_many(&self, ids: &[Uuid]) -> StoreResult<Vec<Store>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let cursor = self
            .collection
            .find(doc! { "_id": { "$in": uuids_to_bson(ids) } })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: &StoreFilter) -> StoreResult<Vec<Store>> {
        let options = FindOptions::builder()
            .limit(filter.limit as i64)
            .skip(page_offset(filter.page, filter.limit))
            .sort(doc! { "created_at": -1 })
            .build();

        let cursor = self
            .collection
            .find(Self::build_filter(filter))
            .with_options(options)
            .await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: &StoreFilter) -> StoreResult<u64> {
        Ok(self
            .collection
            .count_documents(Self::build_filter(filter))
            .await?)
    }

    #[instrument(skip(self, store), fields(store_id = %store.id))]
    async fn replace(&self, store: Store) -> StoreResult<Store> {
        let result = self
            .collection
            .replace_one(id_filter(store.id), &store)
            .await?;
        if result.matched_count == 0 {
            return Err(StoreError::NotFound(store.id));
        }
        Ok(store)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        let result = self.collection.delete_one(id_filter(id)).await?;
        Ok(result.deleted_count > 0)
    }
}
