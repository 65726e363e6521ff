//! Product Service - business logic, image files and search mirroring

use axum_helpers::Paginated;
use chrono::Utc;
use search::{SearchMirror, SearchQuery, order_by_ids};
use std::sync::Arc;
use tracing::{instrument, warn};
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::images::{ImageStorage, ImageUpload, stored_name};
use crate::models::{Product, ProductDocument, ProductFilter, ProductInput};
use crate::repository::ProductRepository;

const SEARCH_FIELDS: &[&str] = &["name"];

pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
    search: SearchMirror,
    images: Arc<dyn ImageStorage>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R, search: SearchMirror, images: Arc<dyn ImageStorage>) -> Self {
        Self {
            repository: Arc::new(repository),
            search,
            images,
        }
    }

    fn check_discounts(input: &ProductInput) -> ProductResult<()> {
        input
            .discounts
            .iter()
            .try_for_each(|d| d.check())
            .map_err(ProductError::Validation)
    }

    async fn mirror(&self, product: &Product) {
        self.search
            .upsert_document(&product.id.to_string(), &ProductDocument::from(product))
            .await;
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self, filter: ProductFilter) -> ProductResult<Paginated<Product>> {
        let query = SearchQuery::new()
            .text(filter.search.as_deref(), SEARCH_FIELDS)
            .term_opt("category", filter.category.clone())
            .paginate(filter.page, filter.limit);

        match self.search.search(&query).await {
            Ok(hits) => {
                let ids: Vec<Uuid> = hits.parsed_ids();
                let records = self.repository.get_many(&ids).await?;
                Ok(Paginated::new(
                    filter.page,
                    filter.limit,
                    hits.total,
                    order_by_ids(&ids, records, |p| p.id),
                ))
            }
            Err(e) => {
                warn!(error = %e, "Product search unavailable, listing from database");
                let total = self.repository.count(&filter).await?;
                let records = self.repository.list(&filter).await?;
                Ok(Paginated::new(filter.page, filter.limit, total, records))
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: Uuid) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, input: ProductInput) -> ProductResult<Product> {
        Self::check_discounts(&input)?;
        let product = self.repository.create(Product::new(input)).await?;

        self.search
            .index_document(&product.id.to_string(), &ProductDocument::from(&product))
            .await;
        Ok(product)
    }

    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: Uuid, input: ProductInput) -> ProductResult<Product> {
        Self::check_discounts(&input)?;
        let mut product = self.get_product(id).await?;
        product.replace_with(input);

        let product = self.repository.replace(product).await?;
        self.mirror(&product).await;
        Ok(product)
    }

    /// Image files are left in place; only the record and its index entry go.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: Uuid) -> ProductResult<()> {
        if !self.repository.delete(id).await? {
            return Err(ProductError::NotFound(id));
        }
        self.search.remove(&id.to_string()).await;
        Ok(())
    }

    /// Store the uploads and append their names to the product.
    ///
    /// Every content type is checked before anything is written.
    #[instrument(skip(self, uploads), fields(count = uploads.len()))]
    pub async fn add_images(&self, id: Uuid, uploads: Vec<ImageUpload>) -> ProductResult<Product> {
        let mut product = self.get_product(id).await?;
        if uploads.is_empty() {
            return Err(ProductError::Validation(
                "Please upload at least one image".to_string(),
            ));
        }

        let names = uploads
            .iter()
            .map(stored_name)
            .collect::<ProductResult<Vec<_>>>()?;

        for (name, upload) in names.iter().zip(&uploads) {
            self.images.save(name, &upload.bytes).await?;
        }

        product.images.extend(names);
        product.updated_at = Utc::now();
        let product = self.repository.replace(product).await?;
        self.mirror(&product).await;
        Ok(product)
    }

    /// Detach the named images, then delete their files.
    ///
    /// Names the product does not reference are ignored. A file that cannot
    /// be deleted is logged and does not fail the request.
    #[instrument(skip(self, names), fields(count = names.len()))]
    pub async fn remove_images(&self, id: Uuid, names: Vec<String>) -> ProductResult<Product> {
        let mut product = self.get_product(id).await?;

        let (removed, kept): (Vec<String>, Vec<String>) = product
            .images
            .drain(..)
            .partition(|image| names.contains(image));
        product.images = kept;
        product.updated_at = Utc::now();

        let product = self.repository.replace(product).await?;
        self.mirror(&product).await;

        for name in &removed {
            match self.images.remove(name).await {
                Ok(true) => {}
                Ok(false) => warn!(file = %name, "Product image file already missing"),
                Err(e) => warn!(file = %name, error = %e, "Failed to delete product image file"),
            }
        }
        Ok(product)
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            search: self.search.clone(),
            images: Arc::clone(&self.images),
        }
    }
}
