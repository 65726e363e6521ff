//! MongoDB implementation of CategoryRepository

use async_trait::async_trait;
use axum_helpers::page_offset;
use database::mongodb::{MongoStore, contains_any, id_filter, uuid_to_bson, uuids_to_bson};
use futures_util::TryStreamExt;
use mongodb::{
    Collection, IndexModel,
    bson::{Document, doc},
    options::{FindOptions, IndexOptions},
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{CategoryError, CategoryResult};
use crate::models::{COLLECTION, Category, CategoryFilter};
use crate::repository::CategoryRepository;

pub struct MongoCategoryRepository {
    collection: Collection<Category>,
}

impl MongoCategoryRepository {
    pub fn new(store: &MongoStore) -> Self {
        Self {
            collection: store.collection::<Category>(COLLECTION),
        }
    }

    pub async fn init_indexes(&self) -> CategoryResult<()> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "slug": 1 })
                .options(
                    IndexOptions::builder()
                        .unique(true)
                        .name("idx_slug_unique".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "parent_id": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_parent".to_string())
                        .build(),
                )
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
        tracing::info!("Category indexes created successfully");
        Ok(())
    }

    fn build_filter(filter: &CategoryFilter) -> Document {
        let mut doc = doc! {};

        if let Some(publish) = filter.publish {
            doc.insert("publish", publish);
        }
        if let Some(ref search) = filter.search {
            doc.extend(contains_any(&["name"], search));
        }

        doc
    }
}

#[async_trait]
impl CategoryRepository for MongoCategoryRepository {
    #[instrument(skip(self, category), fields(category_id = %category.id))]
    async fn create(&self, category: Category) -> CategoryResult<Category> {
        self.collection.insert_one(&category).await?;
        tracing::info!("Category created successfully");
        Ok(category)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> CategoryResult<Option<Category>> {
        Ok(self.collection.find_one(id_filter(id)).await?)
    }

    #[instrument(skip(self, ids), fields(count = ids.len()))]
    async fn get_many(&self, ids: &[Uuid]) -> CategoryResult<Vec<Category>> {
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
    async fn list(&self, filter: &CategoryFilter) -> CategoryResult<Vec<Category>> {
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
    async fn count(&self, filter: &CategoryFilter) -> CategoryResult<u64> {
        Ok(self
            .collection
            .count_documents(Self::build_filter(filter))
            .await?)
    }

    #[instrument(skip(self, category), fields(category_id = %category.id))]
    async fn replace(&self, category: Category) -> CategoryResult<Category> {
        let result = self
            .collection
            .replace_one(id_filter(category.id), &category)
            .await?;

        if result.matched_count == 0 {
            return Err(CategoryError::NotFound(category.id));
        }
        Ok(category)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> CategoryResult<bool> {
        let result = self.collection.delete_one(id_filter(id)).await?;
        Ok(result.deleted_count > 0)
    }

    #[instrument(skip(self))]
    async fn exists_by_slug(&self, slug: &str, exclude: Option<Uuid>) -> CategoryResult<bool> {
        let mut filter = doc! { "slug": slug };
        if let Some(id) = exclude {
            filter.insert("_id", doc! { "$ne": uuid_to_bson(id) });
        }
        Ok(self.collection.count_documents(filter).limit(1).await? > 0)
    }
}
