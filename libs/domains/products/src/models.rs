use axum_helpers::{default_limit, default_page};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

pub const COLLECTION: &str = "products";
pub const SEARCH_INDEX: &str = "products_index";

/// Discount kind
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountType {
    /// `value` is a percentage of the price (0-100)
    Percentage,
    /// `value` is an amount returned to the buyer
    Cashback,
    /// `value` is taken off the delivery fee
    Delivery,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Discount {
    #[serde(rename = "type")]
    pub kind: DiscountType,
    #[validate(range(min = 0.0))]
    pub value: f64,
    #[serde(default)]
    pub start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
}

impl Discount {
    pub fn check(&self) -> Result<(), String> {
        if self.kind == DiscountType::Percentage && self.value > 100.0 {
            return Err("Percentage discount cannot exceed 100".to_string());
        }
        if let (Some(start), Some(end)) = (self.start, self.end) {
            if end < start {
                return Err("Discount end must not be before its start".to_string());
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct VariantAttribute {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Variant {
    #[validate(length(min = 1, message = "Variant SKU is required"))]
    pub sku: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub stock: i32,
    #[serde(default)]
    pub attributes: Vec<VariantAttribute>,
    #[serde(default)]
    pub images: Vec<String>,
}

/// Product entity - stored in MongoDB
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Category id
    #[serde(default)]
    pub category: String,
    pub price: f64,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub discounts: Vec<Discount>,
    /// Stored image file names
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub variants: Vec<Variant>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn new(input: ProductInput) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            description: input.description,
            category: input.category,
            price: input.price,
            sku: input.sku,
            brand: input.brand,
            discounts: input.discounts,
            images: Vec::new(),
            variants: input.variants,
            created_at: now,
            updated_at: now,
        }
    }

    /// Full replace of the editable fields. Images are managed separately.
    pub fn replace_with(&mut self, input: ProductInput) {
        self.name = input.name;
        self.description = input.description;
        self.category = input.category;
        self.price = input.price;
        self.sku = input.sku;
        self.brand = input.brand;
        self.discounts = input.discounts;
        self.variants = input.variants;
        self.updated_at = Utc::now();
    }
}

/// Body of `POST /products` and `PUT /products/{id}`
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct ProductInput {
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "Product name is required"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: f64,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub discounts: Vec<Discount>,
    #[serde(default)]
    #[validate(nested)]
    pub variants: Vec<Variant>,
}

/// Query parameters for `GET /products`
#[derive(Debug, Clone, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ProductFilter {
    /// Free-text search on the name
    pub search: Option<String>,
    /// Category id
    pub category: Option<String>,
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            search: None,
            category: None,
            page: default_page(),
            limit: default_limit(),
        }
    }
}

/// Body of `DELETE /products/{id}/images`
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RemoveImages {
    #[serde(default)]
    #[validate(length(min = 1, message = "Please select the image(s) to be deleted."))]
    pub images: Vec<String>,
}

/// Search-index projection of a product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDocument {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    pub sku: Option<String>,
    pub brand: Option<String>,
    pub images: Vec<String>,
    pub variant_skus: Vec<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Product> for ProductDocument {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            description: product.description.clone(),
            category: product.category.clone(),
            price: product.price,
            sku: product.sku.clone(),
            brand: product.brand.clone(),
            images: product.images.clone(),
            variant_skus: product.variants.iter().map(|v| v.sku.clone()).collect(),
            updated_at: product.updated_at,
        }
    }
}
