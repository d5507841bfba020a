//! Service configuration
//!
//! Values are layered: built-in defaults, then an optional TOML file
//! (`$CONFIG_PATH`, default `config/local.toml`), then environment
//! variables such as `NOTEKEEP_JWT__SECRET` or `NOTEKEEP_SERVER__ADDRESS`.

use anyhow::{Context, Result, ensure};
use auth::{HasherConfig, JwtConfig, MAX_TOKEN_TTL_SECS};
use common::database::DatabaseConfig;
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

/// Config file used when `CONFIG_PATH` is not set
pub const DEFAULT_CONFIG_PATH: &str = "config/local.toml";

/// Prefix of the environment variables read by [`AppConfig::load`]
pub const ENV_PREFIX: &str = "NOTEKEEP";

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on (default: "0.0.0.0:8080")
    pub address: String,
    /// Per-request timeout in seconds (default: 4)
    pub request_timeout_secs: u64,
    /// Origins allowed by CORS; a trailing `:*` matches any port
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: "0.0.0.0:8080".to_string(),
            request_timeout_secs: 4,
            allowed_origins: vec![
                "http://127.0.0.1:*".to_string(),
                "http://localhost:*".to_string(),
            ],
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Deployment environment, `local` or `prod`
    pub env: String,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub hasher: HasherConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            env: "local".to_string(),
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            jwt: JwtConfig::default(),
            hasher: HasherConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `$CONFIG_PATH` and the environment
    pub fn load() -> Result<Self> {
        let path =
            std::env::var("CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(&path)
    }

    /// Load configuration from the given file (if it exists) and the environment
    pub fn load_from(path: &str) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::new(path, FileFormat::Toml).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("server.allowed_origins"),
            )
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path))?;

        let config: AppConfig = settings
            .try_deserialize()
            .context("Invalid configuration")?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        ensure!(
            !self.jwt.secret.is_empty(),
            "jwt.secret must be set (e.g. via {}_JWT__SECRET)",
            ENV_PREFIX
        );
        ensure!(self.jwt.token_ttl_secs > 0, "jwt.token_ttl_secs must be positive");
        ensure!(
            self.jwt.token_ttl_secs <= MAX_TOKEN_TTL_SECS,
            "jwt.token_ttl_secs must be at most {} (24 hours)",
            MAX_TOKEN_TTL_SECS
        );
        ensure!(
            self.server.request_timeout_secs > 0,
            "server.request_timeout_secs must be positive"
        );
        Ok(())
    }
}
