use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::services::llm::{ANTHROPIC_DEFAULT_URL, DEFAULT_MODEL};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub llm: LlmSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: String::new(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_endpoint() -> String { ANTHROPIC_DEFAULT_URL.to_string() }
fn default_model() -> String { DEFAULT_MODEL.to_string() }
fn default_temperature() -> f32 { 0.2 }
fn default_max_tokens() -> u32 { 1024 }
fn default_timeout_secs() -> u64 { 60 }

/// Where the breed catalog comes from
///
/// `database_url` takes precedence over `path`. With neither set the bundled
/// seed catalog is used.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogSettings {
    pub path: Option<String>,
    pub database_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with NEKO__)
    /// 5. `ANTHROPIC_API_KEY` for the model API key
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., NEKO__SERVER__PORT -> server.port
            .add_source(env_source())
            .build()?;

        apply_api_key_override(settings)?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?;

        apply_api_key_override(settings)?.try_deserialize()
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("NEKO")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// The API key conventionally lives in `ANTHROPIC_API_KEY`, often via `.env`
fn apply_api_key_override(settings: Config) -> Result<Config, ConfigError> {
    let builder = Config::builder().add_source(settings);

    match std::env::var("ANTHROPIC_API_KEY") {
        Ok(key) if !key.is_empty() => builder.set_override("llm.api_key", key)?.build(),
        _ => builder.build(),
    }
}
