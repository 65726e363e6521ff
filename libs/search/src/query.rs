use serde_json::{Value, json};

const DEFAULT_SIZE: u64 = 20;

#[derive(Debug, Clone, PartialEq)]
pub struct TermFilter {
    pub field: String,
    pub value: Value,
}

impl TermFilter {
    /// Strings are matched on the `keyword` sub-field that dynamic mapping
    /// adds next to every analyzed text field.
    fn to_clause(&self) -> Value {
        let field = match self.value {
            Value::String(_) => format!("{}.keyword", self.field),
            _ => self.field.clone(),
        };
        json!({ "term": { field: self.value } })
    }
}

/// Free-text plus exact-term query, paged with `from`/`size`.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub text: Option<String>,
    pub fields: Vec<String>,
    pub filters: Vec<TermFilter>,
    pub from: u64,
    pub size: u64,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            text: None,
            fields: Vec::new(),
            filters: Vec::new(),
            from: 0,
            size: DEFAULT_SIZE,
        }
    }
}

impl SearchQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blank text is ignored.
    pub fn text(mut self, text: Option<&str>, fields: &[&str]) -> Self {
        self.text = text
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        self.fields = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    pub fn term(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.filters.push(TermFilter {
            field: field.to_string(),
            value: value.into(),
        });
        self
    }

    pub fn term_opt<V: Into<Value>>(self, field: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.term(field, value),
            None => self,
        }
    }

    pub fn paginate(mut self, page: u64, limit: u64) -> Self {
        let limit = limit.max(1);
        self.from = page.max(1).saturating_sub(1).saturating_mul(limit);
        self.size = limit;
        self
    }

    /// Elasticsearch `_search` request body.
    pub fn to_body(&self) -> Value {
        let query = match (&self.text, self.filters.is_empty()) {
            (None, true) => json!({ "match_all": {} }),
            (text, _) => {
                let must: Vec<Value> = text
                    .iter()
                    .map(|text| {
                        json!({
                            "multi_match": {
                                "query": text,
                                "fields": self.fields,
                                "type": "best_fields",
                            }
                        })
                    })
                    .collect();
                let filter: Vec<Value> = self
                    .filters
                    .iter()
                    .map(TermFilter::to_clause)
                    .collect();
                json!({ "bool": { "must": must, "filter": filter } })
            }
        };

        json!({
            "from": self.from,
            "size": self.size,
            "track_total_hits": true,
            "query": query,
        })
    }

    /// Local evaluation: case-insensitive substring on the text fields,
    /// equality (or array membership) on the term filters.
    pub fn matches(&self, source: &Value) -> bool {
        let text_ok = match &self.text {
            None => true,
            Some(text) => {
                let needle = text.to_lowercase();
                self.fields.iter().any(|field| {
                    source
                        .get(field)
                        .and_then(Value::as_str)
                        .is_some_and(|v| v.to_lowercase().contains(&needle))
                })
            }
        };

        text_ok
            && self.filters.iter().all(|f| match source.get(&f.field) {
                Some(Value::Array(items)) => items.contains(&f.value),
                Some(v) => v == &f.value,
                None => false,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_is_match_all() {
        let body = SearchQuery::new().to_body();
        assert_eq!(body["query"], json!({ "match_all": {} }));
        assert_eq!(body["size"], 20);
        assert_eq!(body["track_total_hits"], true);
    }

    #[test]
    fn test_blank_text_is_ignored() {
        let query = SearchQuery::new().text(Some("   "), &["name"]);
        assert!(query.text.is_none());
    }

    #[test]
    fn test_text_and_filters_build_bool_query() {
        let body = SearchQuery::new()
            .text(Some("shoe"), &["name"])
            .term("publish", true)
            .paginate(3, 10)
            .to_body();

        assert_eq!(body["from"], 20);
        assert_eq!(body["size"], 10);
        assert_eq!(body["query"]["bool"]["must"][0]["multi_match"]["query"], "shoe");
        assert_eq!(body["query"]["bool"]["filter"][0]["term"]["publish"], true);
    }

    #[test]
    fn test_string_terms_use_keyword_field() {
        let body = SearchQuery::new().term("role", "ADMIN").to_body();
        assert_eq!(
            body["query"]["bool"]["filter"][0],
            json!({ "term": { "role.keyword": "ADMIN" } })
        );
    }

    #[test]
    fn test_page_zero_is_first_page() {
        let query = SearchQuery::new().paginate(0, 5);
        assert_eq!(query.from, 0);
        assert_eq!(query.size, 5);
    }

    #[test]
    fn test_matches_text_and_terms() {
        let doc = json!({ "name": "Running Shoes", "publish": true, "tags": ["a", "b"] });

        assert!(SearchQuery::new().text(Some("shoe"), &["name"]).matches(&doc));
        assert!(!SearchQuery::new().text(Some("boot"), &["name"]).matches(&doc));
        assert!(SearchQuery::new().term("publish", true).matches(&doc));
        assert!(!SearchQuery::new().term("publish", false).matches(&doc));
        assert!(SearchQuery::new().term("tags", "b").matches(&doc));
        assert!(!SearchQuery::new().term("missing", 1).matches(&doc));
    }
}
