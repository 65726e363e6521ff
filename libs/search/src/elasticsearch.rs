use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

use crate::config::SearchConfig;
use crate::error::{SearchError, SearchResult};
use crate::index::{SearchHit, SearchHits, SearchIndex};
use crate::query::SearchQuery;

/// Elasticsearch over its REST API.
pub struct ElasticsearchClient {
    client: Client,
    config: SearchConfig,
}

impl ElasticsearchClient {
    pub fn new(config: SearchConfig) -> SearchResult<Self> {
        if config.node.is_empty() {
            return Err(SearchError::Config("node URL is empty".to_string()));
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.node, path.trim_start_matches('/'))
    }

    fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.username {
            Some(username) => request.basic_auth(username, self.config.password.as_ref()),
            None => request,
        }
    }

    fn write_path(&self, path: String) -> String {
        if self.config.refresh_on_write {
            format!("{path}?refresh=wait_for")
        } else {
            path
        }
    }

    async fn error_from(response: Response) -> SearchError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        SearchError::Api { status, body }
    }
}

#[derive(Debug, Deserialize)]
struct EsSearchResponse {
    hits: EsHits,
}

#[derive(Debug, Deserialize)]
struct EsHits {
    #[serde(default)]
    total: Option<EsTotal>,
    #[serde(default)]
    hits: Vec<EsHit>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EsTotal {
    Object { value: u64 },
    Number(u64),
}

#[derive(Debug, Deserialize)]
struct EsHit {
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "_score", default)]
    score: Option<f64>,
    #[serde(rename = "_source", default)]
    source: Value,
}

impl From<EsSearchResponse> for SearchHits {
    fn from(response: EsSearchResponse) -> Self {
        let hits: Vec<SearchHit> = response
            .hits
            .hits
            .into_iter()
            .map(|h| SearchHit {
                id: h.id,
                score: h.score,
                source: h.source,
            })
            .collect();
        let total = match response.hits.total {
            Some(EsTotal::Object { value }) | Some(EsTotal::Number(value)) => value,
            None => hits.len() as u64,
        };
        SearchHits { total, hits }
    }
}

#[async_trait]
impl SearchIndex for ElasticsearchClient {
    #[instrument(skip(self, document))]
    async fn index(&self, index: &str, id: &str, document: Value) -> SearchResult<()> {
        let path = self.write_path(format!("{index}/_doc/{id}"));
        let response = self
            .authed(self.client.put(self.url(&path)))
            .json(&document)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }
        Ok(())
    }

    #[instrument(skip(self, document))]
    async fn update(&self, index: &str, id: &str, document: Value) -> SearchResult<()> {
        let path = self.write_path(format!("{index}/_update/{id}"));
        let response = self
            .authed(self.client.post(self.url(&path)))
            .json(&json!({ "doc": document }))
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(SearchError::DocumentNotFound {
                index: index.to_string(),
                id: id.to_string(),
            });
        }
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }
        Ok(())
    }

    #[instrument(skip(self, document))]
    async fn upsert(&self, index: &str, id: &str, document: Value) -> SearchResult<()> {
        let path = self.write_path(format!("{index}/_update/{id}"));
        let response = self
            .authed(self.client.post(self.url(&path)))
            .json(&json!({ "doc": document, "doc_as_upsert": true }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, index: &str, id: &str) -> SearchResult<bool> {
        let path = self.write_path(format!("{index}/_doc/{id}"));
        let response = self
            .authed(self.client.delete(self.url(&path)))
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(false),
            status if status.is_success() => Ok(true),
            _ => Err(Self::error_from(response).await),
        }
    }

    #[instrument(skip(self, query))]
    async fn search(&self, index: &str, query: &SearchQuery) -> SearchResult<SearchHits> {
        let response = self
            .authed(self.client.post(self.url(&format!("{index}/_search"))))
            .json(&query.to_body())
            .send()
            .await?;

        // Index not created yet: nothing has been written.
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(SearchHits::default());
        }
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        let body: EsSearchResponse = response.json().await?;
        Ok(body.into())
    }

    async fn ping(&self) -> SearchResult<()> {
        let response = self.authed(self.client.get(self.url("/"))).send().await?;
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_response_decoding() {
        let raw = json!({
            "took": 2,
            "hits": {
                "total": { "value": 42, "relation": "eq" },
                "hits": [
                    { "_id": "b", "_score": 1.5, "_source": { "name": "Boots" } },
                    { "_id": "a", "_score": 0.7, "_source": { "name": "Sandals" } }
                ]
            }
        });
        let parsed: EsSearchResponse = serde_json::from_value(raw).unwrap();
        let hits: SearchHits = parsed.into();

        assert_eq!(hits.total, 42);
        assert_eq!(hits.ids(), vec!["b".to_string(), "a".to_string()]);
        assert_eq!(hits.hits[0].source["name"], "Boots");
    }

    #[test]
    fn test_search_response_legacy_total() {
        let raw = json!({ "hits": { "total": 3, "hits": [] } });
        let parsed: EsSearchResponse = serde_json::from_value(raw).unwrap();
        let hits: SearchHits = parsed.into();
        assert_eq!(hits.total, 3);
    }

    #[test]
    fn test_write_path_appends_refresh() {
        let client = ElasticsearchClient::new(SearchConfig::new("http://localhost:9200")).unwrap();
        assert_eq!(
            client.write_path("products/_doc/1".into()),
            "products/_doc/1?refresh=wait_for"
        );
        assert_eq!(client.url("/"), "http://localhost:9200/");
    }

    #[test]
    fn test_empty_node_rejected() {
        let mut config = SearchConfig::new("x");
        config.node.clear();
        assert!(matches!(
            ElasticsearchClient::new(config),
            Err(SearchError::Config(_))
        ));
    }
}
