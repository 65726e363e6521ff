//! MongoDB implementation of UserRepository

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

use crate::error::{UserError, UserResult};
use crate::models::{COLLECTION, User, UserFilter};
use crate::repository::UserRepository;

pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(store: &MongoStore) -> Self {
        Self {
            collection: store.collection::<User>(COLLECTION),
        }
    }

    pub async fn init_indexes(&self) -> UserResult<()> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "email": 1 })
                .options(
                    IndexOptions::builder()
                        .unique(true)
                        .name("idx_email_unique".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "username": 1 })
                .options(
                    IndexOptions::builder()
                        .unique(true)
                        .name("idx_username_unique".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "role": 1, "created_at": -1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_role_created".to_string())
                        .build(),
                )
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("User indexes created successfully");
        Ok(())
    }

    /// Adds `_id != exclude` to `filter`.
    fn excluding(mut filter: Document, exclude: Option<Uuid>) -> Document {
        if let Some(id) = exclude {
            filter.insert("_id", doc! { "$ne": uuid_to_bson(id) });
        }
        filter
    }

    fn build_filter(filter: &UserFilter) -> Document {
        let mut doc = doc! {};

        if let Some(role) = filter.role {
            doc.insert("role", role.to_string());
        }
        if let Some(ref search) = filter.search {
            doc.extend(contains_any(&["name", "email"], search));
        }

        doc
    }

    async fn exists(&self, filter: Document) -> UserResult<bool> {
        let count = self.collection.count_documents(filter).limit(1).await?;
        Ok(count > 0)
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn create(&self, user: User) -> UserResult<User> {
        self.collection.insert_one(&user).await?;
        tracing::info!("User created successfully");
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        Ok(self.collection.find_one(id_filter(id)).await?)
    }

    #[instrument(skip(self, ids), fields(count = ids.len()))]
    async fn get_many(&self, ids: &[Uuid]) -> UserResult<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let cursor = self
            .collection
            .find(doc! { "_id": { "$in": uuids_to_bson(ids) } })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self, email))]
    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        Ok(self
            .collection
            .find_one(doc! { "email": email.to_lowercase() })
            .await?)
    }

    #[instrument(skip(self, email))]
    async fn exists_by_email(&self, email: &str, exclude: Option<Uuid>) -> UserResult<bool> {
        self.exists(Self::excluding(doc! { "email": email.to_lowercase() }, exclude))
            .await
    }

    #[instrument(skip(self))]
    async fn exists_by_username(&self, username: &str, exclude: Option<Uuid>) -> UserResult<bool> {
        self.exists(Self::excluding(doc! { "username": username }, exclude))
            .await
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: &UserFilter) -> UserResult<Vec<User>> {
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
    async fn count(&self, filter: &UserFilter) -> UserResult<u64> {
        Ok(self
            .collection
            .count_documents(Self::build_filter(filter))
            .await?)
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn replace(&self, user: User) -> UserResult<User> {
        let result = self
            .collection
            .replace_one(id_filter(user.id), &user)
            .await?;
        if result.matched_count == 0 {
            return Err(UserError::NotFound(user.id));
        }
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> UserResult<bool> {
        let result = self.collection.delete_one(id_filter(id)).await?;
        Ok(result.deleted_count > 0)
    }
}
