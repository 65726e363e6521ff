use async_trait::async_trait;
use axum_helpers::page_offset;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{CategoryError, CategoryResult};
use crate::models::{Category, CategoryFilter};

/// Repository trait for Category persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn create(&self, category: Category) -> CategoryResult<Category>;

    async fn get_by_id(&self, id: Uuid) -> CategoryResult<Option<Category>>;

    /// Records for `ids`, in no particular order; unknown ids are skipped.
    async fn get_many(&self, ids: &[Uuid]) -> CategoryResult<Vec<Category>>;

    /// Paged database listing, newest first. Used when search is unavailable.
    async fn list(&self, filter: &CategoryFilter) -> CategoryResult<Vec<Category>>;

    async fn count(&self, filter: &CategoryFilter) -> CategoryResult<u64>;

    /// Replace the stored record; `NotFound` if it does not exist.
    async fn replace(&self, category: Category) -> CategoryResult<Category>;

    async fn delete(&self, id: Uuid) -> CategoryResult<bool>;

    async fn exists_by_slug(&self, slug: &str, exclude: Option<Uuid>) -> CategoryResult<bool>;
}

/// In-memory implementation of CategoryRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryCategoryRepository {
    categories: Arc<RwLock<HashMap<Uuid, Category>>>,
}

impl InMemoryCategoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn matches(category: &Category, filter: &CategoryFilter) -> bool {
        if let Some(publish) = filter.publish {
            if category.publish != publish {
                return false;
            }
        }
        if let Some(ref search) = filter.search {
            if !category.name.to_lowercase().contains(&search.to_lowercase()) {
                return false;
            }
        }
        true
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn create(&self, category: Category) -> CategoryResult<Category> {
        let mut categories = self.categories.write().await;

        if categories.values().any(|c| c.slug == category.slug) {
            return Err(CategoryError::DuplicateSlug(category.slug));
        }

        categories.insert(category.id, category.clone());
        tracing::info!(category_id = %category.id, "Created category");
        Ok(category)
    }

    async fn get_by_id(&self, id: Uuid) -> CategoryResult<Option<Category>> {
        Ok(self.categories.read().await.get(&id).cloned())
    }

    async fn get_many(&self, ids: &[Uuid]) -> CategoryResult<Vec<Category>> {
        let categories = self.categories.read().await;
        Ok(ids.iter().filter_map(|id| categories.get(id).cloned()).collect())
    }

    async fn list(&self, filter: &CategoryFilter) -> CategoryResult<Vec<Category>> {
        let categories = self.categories.read().await;

        let mut result: Vec<Category> = categories
            .values()
            .filter(|c| Self::matches(c, filter))
            .cloned()
            .collect();

        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(result
            .into_iter()
            .skip(page_offset(filter.page, filter.limit) as usize)
            .take(filter.limit as usize)
            .collect())
    }

    async fn count(&self, filter: &CategoryFilter) -> CategoryResult<u64> {
        let categories = self.categories.read().await;
        Ok(categories.values().filter(|c| Self::matches(c, filter)).count() as u64)
    }

    async fn replace(&self, category: Category) -> CategoryResult<Category> {
        let mut categories = self.categories.write().await;

        if !categories.contains_key(&category.id) {
            return Err(CategoryError::NotFound(category.id));
        }
        if categories
            .values()
            .any(|c| c.id != category.id && c.slug == category.slug)
        {
            return Err(CategoryError::DuplicateSlug(category.slug));
        }

        categories.insert(category.id, category.clone());
        tracing::info!(category_id = %category.id, "Updated category");
        Ok(category)
    }

    async fn delete(&self, id: Uuid) -> CategoryResult<bool> {
        let removed = self.categories.write().await.remove(&id).is_some();
        if removed {
            tracing::info!(category_id = %id, "Deleted category");
        }
        Ok(removed)
    }

    async fn exists_by_slug(&self, slug: &str, exclude: Option<Uuid>) -> CategoryResult<bool> {
        let categories = self.categories.read().await;
        Ok(categories
            .values()
            .any(|c| c.slug == slug && Some(c.id) != exclude))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::Hierarchy;
    use crate::models::CategoryInput;

    fn category(name: &str, publish: bool) -> Category {
        Category::new(
            CategoryInput {
                name: name.to_string(),
                publish,
                ..Default::default()
            },
            Hierarchy::root(name),
            crate::slug::slugify(name),
        )
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_slug() {
        let repo = InMemoryCategoryRepository::new();
        repo.create(category("Shoes", true)).await.unwrap();

        let err = repo.create(category("Shoes", false)).await.unwrap_err();
        assert!(matches!(err, CategoryError::DuplicateSlug(_)));
    }

    #[tokio::test]
    async fn test_list_filters_and_pages() {
        let repo = InMemoryCategoryRepository::new();
        for (name, publish) in [("Shoes", true), ("Boots", false), ("Shirts", true)] {
            repo.create(category(name, publish)).await.unwrap();
        }

        let published = CategoryFilter {
            publish: Some(true),
            ..Default::default()
        };
        assert_eq!(repo.count(&published).await.unwrap(), 2);

        let first_page = CategoryFilter {
            limit: 2,
            ..Default::default()
        };
        assert_eq!(repo.list(&first_page).await.unwrap().len(), 2);

        let second_page = CategoryFilter {
            page: 2,
            limit: 2,
            ..Default::default()
        };
        assert_eq!(repo.list(&second_page).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_get_many_skips_unknown_ids() {
        let repo = InMemoryCategoryRepository::new();
        let shoes = repo.create(category("Shoes", true)).await.unwrap();

        let found = repo.get_many(&[Uuid::now_v7(), shoes.id]).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, shoes.id);
    }

    #[tokio::test]
    async fn test_exists_by_slug_excludes_self() {
        let repo = InMemoryCategoryRepository::new();
        let shoes = repo.create(category("Shoes", true)).await.unwrap();

        assert!(repo.exists_by_slug("shoes", None).await.unwrap());
        assert!(!repo.exists_by_slug("shoes", Some(shoes.id)).await.unwrap());
    }

    #[tokio::test]
    async fn test_replace_missing_is_not_found() {
        let repo = InMemoryCategoryRepository::new();
        let err = repo.replace(category("Ghost", true)).await.unwrap_err();
        assert!(matches!(err, CategoryError::NotFound(_)));
    }
}
