use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use crate::models::{ScoringWeights, DEFAULT_MAX_AGE_DIFF, DEFAULT_SEARCH_RADIUS_KM};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub geocoder: GeocoderSettings,
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

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8000 }

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
    #[serde(default = "default_search_radius_km")]
    pub default_search_radius_km: f64,
    #[serde(default = "default_max_age_diff")]
    pub default_max_age_diff: u32,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            weights: WeightsConfig::default(),
            default_search_radius_km: default_search_radius_km(),
            default_max_age_diff: default_max_age_diff(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_search_radius_km() -> f64 { DEFAULT_SEARCH_RADIUS_KM }
fn default_max_age_diff() -> u32 { DEFAULT_MAX_AGE_DIFF }
fn default_timeout_ms() -> u64 { 5000 }

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_interests_weight")]
    pub interests: f64,
    #[serde(default = "default_age_weight")]
    pub age: f64,
    #[serde(default = "default_location_weight")]
    pub location: f64,
    #[serde(default = "default_preferences_weight")]
    pub preferences: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            interests: default_interests_weight(),
            age: default_age_weight(),
            location: default_location_weight(),
            preferences: default_preferences_weight(),
        }
    }
}

impl From<&WeightsConfig> for ScoringWeights {
    fn from(config: &WeightsConfig) -> Self {
        Self {
            interests: config.interests,
            age: config.age,
            location: config.location,
            preferences: config.preferences,
        }
    }
}

fn default_interests_weight() -> f64 { 40.0 }
fn default_age_weight() -> f64 { 20.0 }
fn default_location_weight() -> f64 { 20.0 }
fn default_preferences_weight() -> f64 { 20.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct GeocoderSettings {
    #[serde(default = "default_cache_size")]
    pub cache_size: u64,
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    /// Known places served by the built-in gazetteer
    #[serde(default)]
    pub places: Vec<PlaceSettings>,
}

impl Default for GeocoderSettings {
    fn default() -> Self {
        Self {
            cache_size: default_cache_size(),
            cache_ttl_secs: default_cache_ttl_secs(),
            places: Vec::new(),
        }
    }
}

fn default_cache_size() -> u64 { 1000 }
fn default_cache_ttl_secs() -> u64 { 3600 }

#[derive(Debug, Clone, Deserialize)]
pub struct PlaceSettings {
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// `format` is one of `json`, `pretty` or `compact`
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

/// Output shape of the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
    Compact,
}

impl LogFormat {
    /// Case-insensitive; anything unrecognised is `Compact`
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => LogFormat::Json,
            "pretty" => LogFormat::Pretty,
            _ => LogFormat::Compact,
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with LOVEFI__)
    /// 5. `PORT`, as set by most hosting platforms
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., LOVEFI__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("LOVEFI")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        apply_platform_overrides(settings)?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("LOVEFI")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Apply overrides from conventional, unprefixed environment variables
fn apply_platform_overrides(settings: Config) -> Result<Config, ConfigError> {
    let Ok(port) = std::env::var("PORT") else {
        return Ok(settings);
    };

    let port: u16 = port.trim().parse().map_err(|_| {
        ConfigError::Message(format!("PORT must be a valid port number, got {:?}", port))
    })?;

    Config::builder()
        .add_source(settings)
        .set_override("server.port", i64::from(port))?
        .build()
}
