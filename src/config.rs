use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use crate::models::ScoringWeights;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub store: StoreSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
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

/// Where the neighborhood catalog comes from; the bundled dataset when unset
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogSettings {
    pub path: Option<String>,
}

/// Where users and preferences are kept; in memory when `path` is unset
#[derive(Debug, Clone, Deserialize)]
pub struct StoreSettings {
    #[serde(default = "default_store_path")]
    pub path: Option<String>,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self { path: default_store_path() }
    }
}

fn default_store_path() -> Option<String> { Some("data/users.json".to_string()) }

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_top_matches")]
    pub top_matches: usize,
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            top_matches: default_top_matches(),
            max_limit: default_max_limit(),
        }
    }
}

fn default_top_matches() -> usize { 3 }
fn default_max_limit() -> usize { 15 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_budget_weight")]
    pub budget: f64,
    #[serde(default = "default_lifestyle_weight")]
    pub lifestyle: f64,
    #[serde(default = "default_amenities_weight")]
    pub amenities: f64,
    #[serde(default = "default_safety_weight")]
    pub safety: f64,
    #[serde(default = "default_nightlife_weight")]
    pub nightlife: f64,
    #[serde(default = "default_green_space_weight")]
    pub green_space: f64,
    #[serde(default = "default_schools_weight")]
    pub schools: f64,
    #[serde(default = "default_transport_weight")]
    pub transport: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            budget: default_budget_weight(),
            lifestyle: default_lifestyle_weight(),
            amenities: default_amenities_weight(),
            safety: default_safety_weight(),
            nightlife: default_nightlife_weight(),
            green_space: default_green_space_weight(),
            schools: default_schools_weight(),
            transport: default_transport_weight(),
        }
    }
}

impl From<&WeightsConfig> for ScoringWeights {
    fn from(config: &WeightsConfig) -> Self {
        Self {
            budget: config.budget,
            lifestyle: config.lifestyle,
            amenities: config.amenities,
            safety: config.safety,
            nightlife: config.nightlife,
            green_space: config.green_space,
            schools: config.schools,
            transport: config.transport,
        }
    }
}

fn default_budget_weight() -> f64 { 25.0 }
fn default_lifestyle_weight() -> f64 { 20.0 }
fn default_amenities_weight() -> f64 { 15.0 }
fn default_safety_weight() -> f64 { 10.0 }
fn default_nightlife_weight() -> f64 { 8.0 }
fn default_green_space_weight() -> f64 { 8.0 }
fn default_schools_weight() -> f64 { 7.0 }
fn default_transport_weight() -> f64 { 7.0 }

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
    /// 4. Environment variables (prefixed with HOODMATCH_)
    pub fn load() -> Result<Self, ConfigError> {
        let settings: Settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., HOODMATCH__SERVER__PORT -> server.port
            .add_source(environment())
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings: Settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    /// Reject settings the service cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let weights = ScoringWeights::from(&self.scoring.weights);
        let all = [
            weights.budget,
            weights.lifestyle,
            weights.amenities,
            weights.safety,
            weights.nightlife,
            weights.green_space,
            weights.schools,
            weights.transport,
        ];

        if all.iter().any(|weight| !weight.is_finite() || *weight < 0.0) {
            return Err(ConfigError::Message(
                "scoring weights must be finite and non-negative".to_string(),
            ));
        }
        if weights.total() <= f64::EPSILON {
            return Err(ConfigError::Message(
                "scoring weights must not all be zero".to_string(),
            ));
        }
        if self.matching.top_matches == 0 || self.matching.max_limit < self.matching.top_matches {
            return Err(ConfigError::Message(
                "matching.top_matches must be between 1 and matching.max_limit".to_string(),
            ));
        }

        Ok(())
    }

    pub fn scoring_weights(&self) -> ScoringWeights {
        ScoringWeights::from(&self.scoring.weights)
    }
}

fn environment() -> Environment {
    Environment::with_prefix("HOODMATCH")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
