//! # teleops-config
//!
//! Layered configuration loading for Teleops using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`TELEOPS_*` prefix, `__` as separator)
//! 2. Project-level `.teleops/config.toml`
//! 3. User-level `~/.config/teleops/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `TELEOPS_API__BASE_URL` -> `api.base_url`,
//! `TELEOPS_CLASSIFIER__THRESHOLD` -> `classifier.threshold`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use teleops_config::TeleopsConfig;
//!
//! let config = TeleopsConfig::load_with_dotenv().expect("config");
//! if config.api.is_configured() {
//!     println!("API: {}", config.api.base_url);
//! }
//! ```

mod api;
mod classifier;
mod design;
mod error;

pub use api::ApiConfig;
pub use classifier::ClassifierConfig;
pub use design::DesignConfig;
pub use error::ConfigError;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TeleopsConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub design: DesignConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
}

impl TeleopsConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` loading.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration with `.env` file support from the current directory.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        if let Err(error) = dotenvy::dotenv() {
            if !error.not_found() {
                return Err(ConfigError::InvalidValue {
                    field: ".env".into(),
                    reason: error.to_string(),
                });
            }
        }
        Self::load()
    }

    /// Extract and validate a config from an arbitrary figment.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.classifier.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer more providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".teleops/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("TELEOPS_").split("__"))
    }

    /// Fail with [`ConfigError::NotConfigured`] unless the API section is usable.
    pub fn require_api(&self) -> Result<&ApiConfig, ConfigError> {
        if self.api.is_configured() {
            Ok(&self.api)
        } else {
            Err(ConfigError::NotConfigured {
                section: "api".into(),
            })
        }
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("teleops").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_config_loads() {
        let config = TeleopsConfig::default();
        assert!(!config.api.is_configured());
        assert!(config.design.draft_cache_dir.is_empty());
        assert!((config.classifier.threshold - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn figment_builds_without_files() {
        Jail::expect_with(|_jail| {
            let config = TeleopsConfig::from_figment(&TeleopsConfig::figment())
                .map_err(|e| e.to_string())?;
            assert!(!config.api.is_configured());
            assert_eq!(config.api.timeout_secs, 15);
            Ok(())
        });
    }

    #[test]
    fn env_overrides_project_file() {
        Jail::expect_with(|jail| {
            jail.create_dir(".teleops")?;
            jail.create_file(
                ".teleops/config.toml",
                r#"
                [api]
                base_url = "https://file.example.net/api"
                token = "file-token"

                [classifier]
                threshold = 0.5
                "#,
            )?;
            jail.set_env("TELEOPS_API__TOKEN", "env-token");

            let config = TeleopsConfig::from_figment(&TeleopsConfig::figment())
                .map_err(|e| e.to_string())?;
            assert_eq!(config.api.base_url, "https://file.example.net/api");
            assert_eq!(config.api.token, "env-token");
            assert!((config.classifier.threshold - 0.5).abs() < f64::EPSILON);
            Ok(())
        });
    }

    #[test]
    fn invalid_threshold_is_rejected() {
        Jail::expect_with(|jail| {
            jail.set_env("TELEOPS_CLASSIFIER__THRESHOLD", "2.0");
            let result = TeleopsConfig::from_figment(&TeleopsConfig::figment());
            assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
            Ok(())
        });
    }

    #[test]
    fn require_api_reports_missing_section() {
        let config = TeleopsConfig::default();
        let err = config.require_api().unwrap_err();
        assert!(matches!(err, ConfigError::NotConfigured { ref section } if section == "api"));
    }
}
