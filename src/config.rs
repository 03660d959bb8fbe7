use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use crate::models::{FitWeights, RankingLimits};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub verification: VerificationSettings,
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
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSettings {
    #[serde(default = "default_catalog_path")]
    pub path: String,
    #[serde(default = "default_catalog_ttl")]
    pub ttl_secs: u64,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
            ttl_secs: default_catalog_ttl(),
        }
    }
}

fn default_catalog_path() -> String { "data/catalog.json".to_string() }
fn default_catalog_ttl() -> u64 { 300 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchingSettings {
    pub min_compatibility: Option<u32>,
    pub max_results: Option<usize>,
}

impl MatchingSettings {
    pub fn limits(&self) -> RankingLimits {
        let defaults = RankingLimits::default();
        RankingLimits {
            min_compatibility: self.min_compatibility.unwrap_or(defaults.min_compatibility),
            max_results: self.max_results.unwrap_or(defaults.max_results),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_length_weight")]
    pub length: u32,
    #[serde(default = "default_width_weight")]
    pub width: u32,
    #[serde(default = "default_oblique_weight")]
    pub oblique: u32,
    #[serde(default = "default_foot_type_weight")]
    pub foot_type: u32,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            length: default_length_weight(),
            width: default_width_weight(),
            oblique: default_oblique_weight(),
            foot_type: default_foot_type_weight(),
        }
    }
}

impl From<&WeightsConfig> for FitWeights {
    fn from(config: &WeightsConfig) -> Self {
        FitWeights {
            length: config.length,
            width: config.width,
            oblique: config.oblique,
            foot_type: config.foot_type,
        }
    }
}

fn default_length_weight() -> u32 { 46 }
fn default_width_weight() -> u32 { 29 }
fn default_oblique_weight() -> u32 { 17 }
fn default_foot_type_weight() -> u32 { 8 }

#[derive(Debug, Clone, Deserialize)]
pub struct VerificationSettings {
    #[serde(default = "default_verification_ttl")]
    pub ttl_secs: u64,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_verification_capacity")]
    pub capacity: u64,
}

impl Default for VerificationSettings {
    fn default() -> Self {
        Self {
            ttl_secs: default_verification_ttl(),
            max_attempts: default_max_attempts(),
            capacity: default_verification_capacity(),
        }
    }
}

impl VerificationSettings {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

fn default_verification_ttl() -> u64 { 600 }
fn default_max_attempts() -> u32 { 5 }
fn default_verification_capacity() -> u64 { 10_000 }

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
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with SNEAKERFIT__)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., SNEAKERFIT__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("SNEAKERFIT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("SNEAKERFIT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_weights() {
        let weights = FitWeights::from(&WeightsConfig::default());
        assert_eq!(weights, FitWeights::default());
        assert_eq!(weights.length, 46);
        assert_eq!(weights.width, 29);
        assert_eq!(weights.oblique, 17);
        assert_eq!(weights.foot_type, 8);
    }

    #[test]
    fn test_default_limits() {
        let limits = MatchingSettings::default().limits();
        assert_eq!(limits.min_compatibility, 30);
        assert_eq!(limits.max_results, 8);
    }

    #[test]
    fn test_default_logging() {
        let logging = LoggingSettings::default();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, "json");
    }

    #[test]
    fn test_default_verification() {
        let verification = VerificationSettings::default();
        assert_eq!(verification.ttl(), Duration::from_secs(600));
        assert_eq!(verification.max_attempts, 5);
        assert_eq!(verification.capacity, 10_000);
    }

    #[test]
    fn test_load_verification_section() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[verification]\nttl_secs = 120\nmax_attempts = 3").unwrap();

        let settings = Settings::load_from(file.path()).unwrap();

        assert_eq!(settings.verification.ttl_secs, 120);
        assert_eq!(settings.verification.max_attempts, 3);
        assert_eq!(settings.verification.capacity, 10_000);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[catalog]\npath = \"shoes.json\"\n\n[matching]\nmax_results = 3\n\n[scoring.weights]\nlength = 50"
        )
        .unwrap();

        let settings = Settings::load_from(file.path()).unwrap();

        assert_eq!(settings.catalog.path, "shoes.json");
        assert_eq!(settings.catalog.ttl_secs, 300);
        assert_eq!(settings.matching.limits().max_results, 3);
        assert_eq!(settings.matching.limits().min_compatibility, 30);
        assert_eq!(settings.scoring.weights.length, 50);
        assert_eq!(settings.scoring.weights.width, 29);
        assert_eq!(settings.server.port, 8080);
    }
}
