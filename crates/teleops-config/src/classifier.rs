//! Resource-type classifier configuration.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Default confidence above which a suggestion is auto-selected.
const fn default_threshold() -> f64 {
    0.3
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClassifierConfig {
    /// Auto-select threshold; the top suggestion must be strictly above it.
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Optional path to a keyword table TOML replacing the built-in one.
    #[serde(default)]
    pub keyword_table: String,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            keyword_table: String::new(),
        }
    }
}

impl ClassifierConfig {
    /// Check the threshold lies in `[0, 1]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if (0.0..=1.0).contains(&self.threshold) {
            Ok(())
        } else {
            Err(ConfigError::InvalidValue {
                field: "classifier.threshold".into(),
                reason: format!("{} is outside 0.0..=1.0", self.threshold),
            })
        }
    }
}
