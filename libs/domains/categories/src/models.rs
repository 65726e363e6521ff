use axum_helpers::{default_limit, default_page};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::hierarchy::Hierarchy;

pub const COLLECTION: &str = "categories";
pub const SEARCH_INDEX: &str = "categories_index";

/// Category entity - stored in MongoDB with its hierarchy denormalized
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Category {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub name: String,
    /// URL-safe form of the name, unique across categories
    pub slug: String,
    #[serde(default)]
    pub description: String,
    /// Depth in the tree, 0 for roots
    pub level: u32,
    #[serde(default)]
    pub parent_id: Option<Uuid>,
    /// Ancestor ids, root first
    #[serde(default)]
    pub ancestors: Vec<Uuid>,
    /// Ancestor names and own name joined by `>`
    pub path: String,
    #[serde(default)]
    pub publish: bool,
    #[serde(default)]
    pub meta_title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub meta_keywords: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    pub fn new(input: CategoryInput, hierarchy: Hierarchy, slug: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            slug,
            description: input.description,
            level: hierarchy.level,
            parent_id: hierarchy.parent_id,
            ancestors: hierarchy.ancestors,
            path: hierarchy.path,
            publish: input.publish,
            meta_title: input.meta_title,
            meta_description: input.meta_description,
            meta_keywords: input.meta_keywords,
            created_at: now,
            updated_at: now,
        }
    }

    /// Full replace of the editable fields; id and `created_at` are kept.
    pub fn replace_with(&mut self, input: CategoryInput, hierarchy: Hierarchy, slug: String) {
        self.name = input.name;
        self.slug = slug;
        self.description = input.description;
        self.level = hierarchy.level;
        self.parent_id = hierarchy.parent_id;
        self.ancestors = hierarchy.ancestors;
        self.path = hierarchy.path;
        self.publish = input.publish;
        self.meta_title = input.meta_title;
        self.meta_description = input.meta_description;
        self.meta_keywords = input.meta_keywords;
        self.updated_at = Utc::now();
    }
}

/// Body of `POST /categories` and `PUT /categories/{id}`
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CategoryInput {
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "Name is required"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Parent category id; absent or empty for a root category
    #[serde(default, alias = "parentId")]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub publish: bool,
    #[serde(default)]
    pub meta_title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub meta_keywords: Option<String>,
}

impl CategoryInput {
    pub fn parent_ref(&self) -> Option<&str> {
        self.parent_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}

/// Query parameters for `GET /categories`
#[derive(Debug, Clone, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct CategoryFilter {
    /// Free-text search on the name
    pub search: Option<String>,
    pub publish: Option<bool>,
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

impl Default for CategoryFilter {
    fn default() -> Self {
        Self {
            search: None,
            publish: None,
            page: default_page(),
            limit: default_limit(),
        }
    }
}

/// Search-index projection of a category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryDocument {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub level: u32,
    pub parent_id: Option<String>,
    pub path: String,
    pub publish: bool,
}

impl From<&Category> for CategoryDocument {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id.to_string(),
            name: category.name.clone(),
            slug: category.slug.clone(),
            description: category.description.clone(),
            level: category.level,
            parent_id: category.parent_id.map(|id| id.to_string()),
            path: category.path.clone(),
            publish: category.publish,
        }
    }
}

/// Body of `POST /categories/suggestions`
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct SuggestionRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub meta_title: String,
    #[serde(default)]
    pub meta_description: String,
    #[serde(default)]
    pub meta_keywords: String,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LengthStatus {
    Short,
    Ideal,
    Long,
}

impl LengthStatus {
    pub fn classify(value: usize, min: usize, max: usize) -> Self {
        if value < min {
            LengthStatus::Short
        } else if value > max {
            LengthStatus::Long
        } else {
            LengthStatus::Ideal
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SeoScores {
    pub meta_title_length_status: LengthStatus,
    pub meta_title_keyword_present: bool,
    pub meta_description_length_status: LengthStatus,
    pub meta_description_keyword_present: bool,
    pub description_word_count_status: LengthStatus,
    /// Keyword occurrences per 100 description words, two decimals
    pub description_keyword_density: f64,
    pub description_keyword_presence: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SeoSuggestions {
    pub category_name: Vec<String>,
    pub category_description: Vec<String>,
    pub meta_title: Vec<String>,
    pub meta_description: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SuggestionResponse {
    pub suggestions: SeoSuggestions,
    pub scores: SeoScores,
}
