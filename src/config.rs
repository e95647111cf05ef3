use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub registry: RegistrySettings,
    pub database: DatabaseSettings,
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub spotlight: SpotlightSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegistrySettings {
    pub base_url: String,
    /// Required; an empty key is rejected at startup
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_species")]
    pub species: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_species() -> String { "dogs".to_string() }
fn default_timeout_secs() -> u64 { 30 }

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_breed_page_size")]
    pub breed_page_size: u32,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            breed_page_size: default_breed_page_size(),
        }
    }
}

fn default_page_size() -> u32 { 150 }
fn default_breed_page_size() -> u32 { 200 }

#[derive(Debug, Clone, Deserialize)]
pub struct SpotlightSettings {
    #[serde(default = "default_spotlight_radius")]
    pub radius_miles: u32,
    #[serde(default = "default_candidate_pool")]
    pub candidate_pool: u32,
    #[serde(default = "default_spotlight_limit")]
    pub default_limit: usize,
    #[serde(default = "default_spotlight_max_limit")]
    pub max_limit: usize,
}

impl Default for SpotlightSettings {
    fn default() -> Self {
        Self {
            radius_miles: default_spotlight_radius(),
            candidate_pool: default_candidate_pool(),
            default_limit: default_spotlight_limit(),
            max_limit: default_spotlight_max_limit(),
        }
    }
}

fn default_spotlight_radius() -> u32 { 100 }
fn default_candidate_pool() -> u32 { 100 }
fn default_spotlight_limit() -> usize { 3 }
fn default_spotlight_max_limit() -> usize { 12 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

/// Output format of the log subscriber
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
    Compact,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with PETSPOT__)
    /// 5. `DATABASE_URL` and `RESCUEGROUPS_API_KEY` aliases
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., PETSPOT__SERVER__PORT -> server.port
            .add_source(env_source())
            .build()?;

        let settings = apply_env_aliases(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?;

        settings.try_deserialize()
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("PETSPOT")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// Honour the conventional variable names used by deploy tooling
fn apply_env_aliases(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(database_url) = env::var("DATABASE_URL") {
        builder = builder.set_override("database.url", database_url)?;
    }
    if let Ok(api_key) = env::var("RESCUEGROUPS_API_KEY") {
        builder = builder.set_override("registry.api_key", api_key)?;
    }

    builder.build()
}
