use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Bind address (default: "0.0.0.0")
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Port number (default: 8080)
    #[serde(default = "default_port")]
    pub port: u16,
    /// Catalog configuration
    #[serde(default)]
    pub catalog: CatalogConfig,
}

fn default_bind() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Catalog backend configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CatalogConfig {
    /// JSON array of products in a single file
    Filesystem { path: PathBuf },
}

impl Default for CatalogConfig {
    fn default() -> Self {
        CatalogConfig::Filesystem {
            path: PathBuf::from("./catalog/products.json"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
            catalog: CatalogConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, environment, and CLI arguments
    pub fn load(
        config_path: Option<&PathBuf>,
        cli_bind: Option<&str>,
        cli_port: Option<u16>,
        cli_catalog_path: Option<&PathBuf>,
    ) -> anyhow::Result<Self> {
        // Start with default config
        let mut config = if let Some(path) = config_path {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content)?
        } else {
            // Try default config file
            if let Ok(content) = std::fs::read_to_string("stockroom.toml") {
                toml::from_str(&content)?
            } else {
                Config::default()
            }
        };

        config.apply_env(|key| std::env::var(key).ok());

        // Override with CLI arguments
        if let Some(bind) = cli_bind {
            config.bind = bind.to_string();
        }
        if let Some(port) = cli_port {
            config.port = port;
        }
        if let Some(path) = cli_catalog_path {
            config.catalog = CatalogConfig::Filesystem { path: path.clone() };
        }

        Ok(config)
    }

    /// Override with `STOCKROOM_*` environment variables
    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(bind) = var("STOCKROOM_BIND") {
            self.bind = bind;
        }
        if let Some(port) = var("STOCKROOM_PORT") {
            if let Ok(p) = port.parse() {
                self.port = p;
            }
        }
        if let Some(path) = var("STOCKROOM_CATALOG_PATH") {
            self.catalog = CatalogConfig::Filesystem {
                path: PathBuf::from(path),
            };
        }
    }
}
