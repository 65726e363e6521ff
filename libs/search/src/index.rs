use std::collections::HashMap;
use std::hash::Hash;
use std::str::FromStr;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::SearchResult;
use crate::query::SearchQuery;

#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub id: String,
    pub score: Option<f64>,
    pub source: Value,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchHits {
    pub total: u64,
    pub hits: Vec<SearchHit>,
}

impl SearchHits {
    pub fn ids(&self) -> Vec<String> {
        self.hits.iter().map(|h| h.id.clone()).collect()
    }

    /// Hit ids that parse as `T`, in rank order.
    pub fn parsed_ids<T: FromStr>(&self) -> Vec<T> {
        self.hits.iter().filter_map(|h| h.id.parse().ok()).collect()
    }
}

/// Reorder `records` to follow `ids`, dropping ids with no record.
pub fn order_by_ids<T, K: Eq + Hash>(ids: &[K], records: Vec<T>, key: impl Fn(&T) -> K) -> Vec<T> {
    let mut by_id: HashMap<K, T> = records.into_iter().map(|r| (key(&r), r)).collect();
    ids.iter().filter_map(|id| by_id.remove(id)).collect()
}

/// Document index operations needed by the admin backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchIndex: Send + Sync {
    /// Create or replace the whole document.
    async fn index(&self, index: &str, id: &str, document: Value) -> SearchResult<()>;

    /// Partial update; fails if the document does not exist.
    async fn update(&self, index: &str, id: &str, document: Value) -> SearchResult<()>;

    /// Partial update, creating the document when missing.
    async fn upsert(&self, index: &str, id: &str, document: Value) -> SearchResult<()>;

    /// Returns `false` when the document was already absent.
    async fn delete(&self, index: &str, id: &str) -> SearchResult<bool>;

    async fn search(&self, index: &str, query: &SearchQuery) -> SearchResult<SearchHits>;

    async fn ping(&self) -> SearchResult<()>;
}
