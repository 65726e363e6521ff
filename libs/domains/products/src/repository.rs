use async_trait::async_trait;
use axum_helpers::page_offset;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductFilter};

/// Repository trait for Product persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create(&self, product: Product) -> ProductResult<Product>;

    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>>;

    async fn get_many(&self, ids: &[Uuid]) -> ProductResult<Vec<Product>>;

    /// Paged database listing, newest first
    async fn list(&self, filter: &ProductFilter) -> ProductResult<Vec<Product>>;

    async fn count(&self, filter: &ProductFilter) -> ProductResult<u64>;

    async fn replace(&self, product: Product) -> ProductResult<Product>;

    async fn delete(&self, id: Uuid) -> ProductResult<bool>;
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<Uuid, Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn matches(product: &Product, filter: &ProductFilter) -> bool {
        if let Some(ref category) = filter.category {
            if &product.category != category {
                return false;
            }
        }
        if let Some(ref search) = filter.search {
            if !product.name.to_lowercase().contains(&search.to_lowercase()) {
                return false;
            }
        }
        true
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, product: Product) -> ProductResult<Product> {
        self.products
            .write()
            .await
            .insert(product.id, product.clone());
        tracing::info!(product_id = %product.id, "Created product");
        Ok(product)
    }

    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        Ok(self.products.read().await.get(&id).cloned())
    }

    async fn get_many(&self, ids: &[Uuid]) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;
        Ok(ids.iter().filter_map(|id| products.get(id).cloned()).collect())
    }

    async fn list(&self, filter: &ProductFilter) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;
        let mut result: Vec<Product> = products
            .values()
            .filter(|p| Self::matches(p, filter))
            .cloned()
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(result
            .into_iter()
            .skip(page_offset(filter.page, filter.limit) as usize)
            .take(filter.limit as usize)
            .collect())
    }

    async fn count(&self, filter: &ProductFilter) -> ProductResult<u64> {
        let products = self.products.read().await;
        Ok(products.values().filter(|p| Self::matches(p, filter)).count() as u64)
    }

    async fn replace(&self, product: Product) -> ProductResult<Product> {
        let mut products = self.products.write().await;
        if !products.contains_key(&product.id) {
            return Err(ProductError::NotFound(product.id));
        }
        products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn delete(&self, id: Uuid) -> ProductResult<bool> {
        Ok(self.products.write().await.remove(&id).is_some())
    }
}
