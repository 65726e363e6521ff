use core_ai::GeminiConfig;
use core_config::{AppInfo, FromEnv, app_info, env_parse, server::ServerConfig};
use database::mongodb::MongoConfig;
use domain_products::handlers::DEFAULT_UPLOAD_LIMIT;
use search::SearchConfig;

pub use core_config::Environment;

/// Admin API configuration, composed from the shared config components
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub search: SearchConfig,
    /// `None` when `GEMINI_API_KEY` is unset; AI endpoints then answer 503.
    pub gemini: Option<GeminiConfig>,
    /// `UPLOAD_MAX_BYTES`, body cap for product image uploads
    pub upload_max_bytes: usize,
    pub server: ServerConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let mongodb = MongoConfig::from_env()?;
        let search = SearchConfig::from_env()?;
        let server = ServerConfig::from_env()?;
        let gemini = GeminiConfig::from_env().ok();
        let upload_max_bytes = env_parse("UPLOAD_MAX_BYTES", DEFAULT_UPLOAD_LIMIT)?;

        Ok(Self {
            app: app_info!(),
            mongodb,
            search,
            gemini,
            upload_max_bytes,
            server,
            environment,
        })
    }
}
