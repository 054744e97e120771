/// Server configuration
use crate::error::{Result, ServerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_api")]
    pub api: ApiSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

/// Limits applied to listing endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct ApiSettings {
    /// Page size used when a request does not name one
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,

    /// Larger requested page sizes and leaderboard limits are clamped to this
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,

    /// Entries returned by popular/recent when no limit is given
    #[serde(default = "default_leaderboard_limit")]
    pub default_leaderboard_limit: u32,
}

impl ServerConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `config.toml` in the working
    /// directory is read when present. Environment variables prefixed with
    /// `CATALOG_` override both, with `__` between section and key
    /// (e.g. `CATALOG_STORAGE__DATABASE_URL`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let config_path = PathBuf::from("config.toml");
                if config_path.exists() {
                    settings = settings.add_source(config::File::from(config_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("CATALOG")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.host.parse::<std::net::IpAddr>().is_err() {
            return Err(ServerError::Config(format!(
                "Invalid server host: {}",
                self.server.host
            )));
        }

        if self.storage.database_url.trim().is_empty() {
            return Err(ServerError::Config(
                "Database URL is required (set CATALOG_STORAGE__DATABASE_URL)".to_string(),
            ));
        }

        if self.storage.max_connections == 0 {
            return Err(ServerError::Config(
                "storage.max_connections must be at least 1".to_string(),
            ));
        }

        let api = &self.api;
        if api.max_page_size == 0 {
            return Err(ServerError::Config(
                "api.max_page_size must be at least 1".to_string(),
            ));
        }
        if api.default_page_size == 0 || api.default_page_size > api.max_page_size {
            return Err(ServerError::Config(format!(
                "api.default_page_size must be between 1 and {}",
                api.max_page_size
            )));
        }
        if api.default_leaderboard_limit == 0 {
            return Err(ServerError::Config(
                "api.default_leaderboard_limit must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
        max_connections: default_max_connections(),
    }
}

fn default_database_url() -> String {
    "sqlite://./data/catalog.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_api() -> ApiSettings {
    ApiSettings::default()
}

fn default_page_size() -> u32 {
    catalog_core::types::DEFAULT_PAGE_SIZE
}

fn default_max_page_size() -> u32 {
    100
}

fn default_leaderboard_limit() -> u32 {
    10
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            default_leaderboard_limit: default_leaderboard_limit(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            storage: default_storage(),
            api: default_api(),
        }
    }
}
