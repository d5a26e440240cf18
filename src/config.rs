use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::{env, path::PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub store: StoreConfig,
    #[serde(default)]
    pub planner: PlannerConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// JSON documents backing the recipe and plan stores.
#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    pub recipes_path: PathBuf,
    pub plans_path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PlannerConfig {
    /// Used by the CLI when `--dinners` is not given.
    #[serde(default = "default_dinners_per_week")]
    pub dinners_per_week: u8,
    /// Upper bound on candidates fetched from the recipe store per pass.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            dinners_per_week: default_dinners_per_week(),
            page_size: default_page_size(),
        }
    }
}

fn default_dinners_per_week() -> u8 {
    5
}

fn default_page_size() -> usize {
    weeknight_recipe::DEFAULT_PAGE_SIZE
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (WEEKNIGHT__SERVER__PORT, etc.)
    /// 2. Config file specified by path, `CONFIG_PATH` or `config/default.toml`
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("store.recipes_path", "data/recipes.json")?
            .set_default("store.plans_path", "data/mealplans.json")?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("WEEKNIGHT")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if self.planner.page_size == 0 {
            return Err("Planner page_size must be at least 1".to_string());
        }
        if !(1..=7).contains(&self.planner.dinners_per_week) {
            return Err("Planner dinners_per_week must be between 1 and 7".to_string());
        }
        if self.store.recipes_path.as_os_str().is_empty()
            || self.store.plans_path.as_os_str().is_empty()
        {
            return Err("Store paths must not be empty".to_string());
        }
        Ok(())
    }
}
