use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::SearchResult;
use crate::index::{SearchHits, SearchIndex};
use crate::query::SearchQuery;

/// Best-effort projection of one collection into one search index.
///
/// Writes never fail the caller: errors are logged and reported as `false`.
/// Reads propagate errors so the caller can fall back to the database.
#[derive(Clone)]
pub struct SearchMirror {
    index: Arc<dyn SearchIndex>,
    index_name: String,
}

impl SearchMirror {
    pub fn new(index: Arc<dyn SearchIndex>, index_name: impl Into<String>) -> Self {
        Self {
            index,
            index_name: index_name.into(),
        }
    }

    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    pub async fn index_document<T: Serialize>(&self, id: &str, document: &T) -> bool {
        let body = match serde_json::to_value(document) {
            Ok(body) => body,
            Err(e) => {
                warn!(index = %self.index_name, %id, error = %e, "Failed to encode search document");
                return false;
            }
        };

        match self.index.index(&self.index_name, id, body).await {
            Ok(()) => {
                debug!(index = %self.index_name, %id, "Indexed document");
                true
            }
            Err(e) => {
                warn!(index = %self.index_name, %id, error = %e, "Failed to index document");
                false
            }
        }
    }

    pub async fn upsert_document<T: Serialize>(&self, id: &str, document: &T) -> bool {
        let body = match serde_json::to_value(document) {
            Ok(body) => body,
            Err(e) => {
                warn!(index = %self.index_name, %id, error = %e, "Failed to encode search document");
                return false;
            }
        };

        match self.index.upsert(&self.index_name, id, body).await {
            Ok(()) => {
                debug!(index = %self.index_name, %id, "Upserted document");
                true
            }
            Err(e) => {
                warn!(index = %self.index_name, %id, error = %e, "Failed to upsert document");
                false
            }
        }
    }

    pub async fn remove(&self, id: &str) -> bool {
        match self.index.delete(&self.index_name, id).await {
            Ok(found) => {
                if !found {
                    debug!(index = %self.index_name, %id, "Document was not indexed");
                }
                true
            }
            Err(e) => {
                warn!(index = %self.index_name, %id, error = %e, "Failed to remove document");
                false
            }
        }
    }

    pub async fn search(&self, query: &SearchQuery) -> SearchResult<SearchHits> {
        self.index.search(&self.index_name, query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SearchError;
    use crate::index::MockSearchIndex;
    use serde_json::json;

    #[tokio::test]
    async fn test_index_failure_is_swallowed() {
        let mut mock = MockSearchIndex::new();
        mock.expect_index()
            .withf(|index, id, _| index == "categories" && id == "c1")
            .times(1)
            .returning(|_, _, _| Err(SearchError::Unavailable("down".into())));

        let mirror = SearchMirror::new(Arc::new(mock), "categories");
        assert!(!mirror.index_document("c1", &json!({"name": "Shoes"})).await);
    }

    #[tokio::test]
    async fn test_upsert_success() {
        let mut mock = MockSearchIndex::new();
        mock.expect_upsert()
            .withf(|_, _, doc| doc["name"] == "Shoes")
            .times(1)
            .returning(|_, _, _| Ok(()));

        let mirror = SearchMirror::new(Arc::new(mock), "categories");
        assert!(mirror.upsert_document("c1", &json!({"name": "Shoes"})).await);
    }

    #[tokio::test]
    async fn test_remove_absent_is_ok() {
        let mut mock = MockSearchIndex::new();
        mock.expect_delete().times(1).returning(|_, _| Ok(false));

        let mirror = SearchMirror::new(Arc::new(mock), "stores");
        assert!(mirror.remove("s1").await);
    }

    #[tokio::test]
    async fn test_search_propagates_errors() {
        let mut mock = MockSearchIndex::new();
        mock.expect_search()
            .returning(|_, _| Err(SearchError::Unavailable("down".into())));

        let mirror = SearchMirror::new(Arc::new(mock), "users");
        assert!(mirror.search(&SearchQuery::new()).await.is_err());
    }
}
