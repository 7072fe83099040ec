use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use config::builder::DefaultState;
use serde::Deserialize;
use std::path::Path;

use crate::core::matcher::{Matcher, DEFAULT_MIN_GENERATED_SCORE};
use crate::models::ScoringWeights;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
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
pub struct MatchingSettings {
    #[serde(default = "default_limit")]
    pub default_limit: u16,
    #[serde(default = "default_max_limit")]
    pub max_limit: u16,
    #[serde(default = "default_min_generated_score")]
    pub min_generated_score: f64,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
            min_generated_score: default_min_generated_score(),
        }
    }
}

fn default_limit() -> u16 { 20 }
fn default_max_limit() -> u16 { 100 }
fn default_min_generated_score() -> f64 { DEFAULT_MIN_GENERATED_SCORE }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_industry_weight")]
    pub industry: f64,
    #[serde(default = "default_funding_weight")]
    pub funding: f64,
    #[serde(default = "default_geographic_weight")]
    pub geographic: f64,
    #[serde(default = "default_stage_weight")]
    pub stage: f64,
    #[serde(default = "default_market_size_weight")]
    pub market_size: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            industry: default_industry_weight(),
            funding: default_funding_weight(),
            geographic: default_geographic_weight(),
            stage: default_stage_weight(),
            market_size: default_market_size_weight(),
        }
    }
}

fn default_industry_weight() -> f64 { 0.30 }
fn default_funding_weight() -> f64 { 0.25 }
fn default_geographic_weight() -> f64 { 0.15 }
fn default_stage_weight() -> f64 { 0.20 }
fn default_market_size_weight() -> f64 { 0.10 }

impl From<&WeightsConfig> for ScoringWeights {
    fn from(weights: &WeightsConfig) -> Self {
        ScoringWeights {
            industry: weights.industry,
            funding: weights.funding,
            geographic: weights.geographic,
            stage: weights.stage,
            market_size: weights.market_size,
        }
    }
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
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Built-in defaults
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with AUXYN__)
    pub fn load() -> Result<Self, ConfigError> {
        base_builder()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., AUXYN__SERVER__PORT -> server.port
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        base_builder()?
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from TOML text, without environment overrides
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        base_builder()?
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    pub fn scoring_weights(&self) -> ScoringWeights {
        ScoringWeights::from(&self.scoring.weights)
    }

    /// Build the matcher described by the scoring and matching sections
    pub fn matcher(&self) -> Matcher {
        Matcher::new(self.scoring_weights(), self.matching.min_generated_score)
    }

    /// Default and maximum result limits, with the default capped at the maximum
    pub fn limits(&self) -> (usize, usize) {
        let max = usize::from(self.matching.max_limit.max(1));
        let default = usize::from(self.matching.default_limit.max(1)).min(max);
        (default, max)
    }
}

fn base_builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8080)
}

fn environment() -> Environment {
    Environment::with_prefix("AUXYN")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
