use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::error::{SearchError, SearchResult};
use crate::index::{SearchHit, SearchHits, SearchIndex};
use crate::query::SearchQuery;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchCall {
    Index { index: String, id: String },
    Update { index: String, id: String },
    Upsert { index: String, id: String },
    Delete { index: String, id: String },
    Search { index: String },
}

type Documents = HashMap<String, Vec<(String, Value)>>;

/// Process-local index used by tests and local development.
#[derive(Clone, Default)]
pub struct InMemorySearchIndex {
    documents: Arc<RwLock<Documents>>,
    calls: Arc<RwLock<Vec<SearchCall>>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemorySearchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call fail with `SearchError::Unavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub async fn calls(&self) -> Vec<SearchCall> {
        self.calls.read().await.clone()
    }

    pub async fn document(&self, index: &str, id: &str) -> Option<Value> {
        self.documents
            .read()
            .await
            .get(index)
            .and_then(|docs| docs.iter().find(|(doc_id, _)| doc_id == id))
            .map(|(_, doc)| doc.clone())
    }

    pub async fn len(&self, index: &str) -> usize {
        self.documents
            .read()
            .await
            .get(index)
            .map_or(0, Vec::len)
    }

    async fn record(&self, call: SearchCall) -> SearchResult<()> {
        self.calls.write().await.push(call);
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(SearchError::Unavailable("in-memory index disabled".into()));
        }
        Ok(())
    }
}

fn merge(target: &mut Value, patch: Value) {
    match (target, patch) {
        (Value::Object(target), Value::Object(patch)) => {
            for (key, value) in patch {
                target.insert(key, value);
            }
        }
        (target, patch) => *target = patch,
    }
}

#[async_trait]
impl SearchIndex for InMemorySearchIndex {
    async fn index(&self, index: &str, id: &str, document: Value) -> SearchResult<()> {
        self.record(SearchCall::Index {
            index: index.into(),
            id: id.into(),
        })
        .await?;

        let mut documents = self.documents.write().await;
        let docs = documents.entry(index.to_string()).or_default();
        match docs.iter_mut().find(|(doc_id, _)| doc_id == id) {
            Some((_, existing)) => *existing = document,
            None => docs.push((id.to_string(), document)),
        }
        Ok(())
    }

    async fn update(&self, index: &str, id: &str, document: Value) -> SearchResult<()> {
        self.record(SearchCall::Update {
            index: index.into(),
            id: id.into(),
        })
        .await?;

        let mut documents = self.documents.write().await;
        let existing = documents
            .get_mut(index)
            .and_then(|docs| docs.iter_mut().find(|(doc_id, _)| doc_id == id))
            .ok_or_else(|| SearchError::DocumentNotFound {
                index: index.to_string(),
                id: id.to_string(),
            })?;
        merge(&mut existing.1, document);
        Ok(())
    }

    async fn upsert(&self, index: &str, id: &str, document: Value) -> SearchResult<()> {
        self.record(SearchCall::Upsert {
            index: index.into(),
            id: id.into(),
        })
        .await?;

        let mut documents = self.documents.write().await;
        let docs = documents.entry(index.to_string()).or_default();
        match docs.iter_mut().find(|(doc_id, _)| doc_id == id) {
            Some((_, existing)) => merge(existing, document),
            None => docs.push((id.to_string(), document)),
        }
        Ok(())
    }

    async fn delete(&self, index: &str, id: &str) -> SearchResult<bool> {
        self.record(SearchCall::Delete {
            index: index.into(),
            id: id.into(),
        })
        .await?;

        let mut documents = self.documents.write().await;
        let Some(docs) = documents.get_mut(index) else {
            return Ok(false);
        };
        let before = docs.len();
        docs.retain(|(doc_id, _)| doc_id != id);
        Ok(docs.len() != before)
    }

    async fn search(&self, index: &str, query: &SearchQuery) -> SearchResult<SearchHits> {
        self.record(SearchCall::Search {
            index: index.into(),
        })
        .await?;

        let documents = self.documents.read().await;
        let matching: Vec<&(String, Value)> = documents
            .get(index)
            .map(|docs| docs.iter().filter(|(_, doc)| query.matches(doc)).collect())
            .unwrap_or_default();

        let total = matching.len() as u64;
        let hits = matching
            .into_iter()
            .skip(query.from as usize)
            .take(query.size as usize)
            .map(|(id, doc)| SearchHit {
                id: id.clone(),
                score: None,
                source: doc.clone(),
            })
            .collect();

        Ok(SearchHits { total, hits })
    }

    async fn ping(&self) -> SearchResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(SearchError::Unavailable("in-memory index disabled".into()));
        }
        Ok(())
    }
}
