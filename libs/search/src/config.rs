use core_config::{ConfigError, FromEnv, env_first, env_parse, env_required};

/// Connection settings for the Elasticsearch REST API.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Base URL, e.g. `http://localhost:9200`
    pub node: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub timeout_secs: u64,
    /// Append `refresh=wait_for` to writes so the next list sees them.
    pub refresh_on_write: bool,
}

impl SearchConfig {
    pub fn new(node: impl Into<String>) -> Self {
        Self {
            node: node.into().trim_end_matches('/').to_string(),
            username: None,
            password: None,
            timeout_secs: 10,
            refresh_on_write: true,
        }
    }

    pub fn with_basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }
}

impl FromEnv for SearchConfig {
    /// `ELASTICSEARCH_NODE` (required), `ELASTICSEARCH_USERNAME`,
    /// `ELASTICSEARCH_PASSWORD`, `ELASTICSEARCH_TIMEOUT_SECS` (10),
    /// `ELASTICSEARCH_REFRESH_ON_WRITE` (true).
    fn from_env() -> Result<Self, ConfigError> {
        let mut config = SearchConfig::new(env_required("ELASTICSEARCH_NODE")?);
        config.username = env_first(&["ELASTICSEARCH_USERNAME"]);
        config.password = env_first(&["ELASTICSEARCH_PASSWORD"]);
        config.timeout_secs = env_parse("ELASTICSEARCH_TIMEOUT_SECS", config.timeout_secs)?;
        config.refresh_on_write =
            env_parse("ELASTICSEARCH_REFRESH_ON_WRITE", config.refresh_on_write)?;
        Ok(config)
    }
}
