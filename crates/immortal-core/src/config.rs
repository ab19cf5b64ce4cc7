//! Session configuration.
//!
//! Every field has a default, so a config file only needs the values it
//! changes:
//!
//! ```
//! use immortal_core::config::SessionConfig;
//!
//! let config = SessionConfig::from_json_str(r#"{ "seed": 42 }"#).unwrap();
//! assert_eq!(config.seed, Some(42));
//! assert_eq!(config.rice_price, 1.0);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Seed for effect randomness. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Entries kept in the player log.
    pub log_capacity: usize,
    /// Health lost on a day the character is hungry with no food or money.
    pub starvation_damage: f64,
    /// Money spent on a bowl of rice when hungry with no food held.
    pub rice_price: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: None,
            log_capacity: 500,
            starvation_damage: 20.0,
            rice_price: 1.0,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

impl SessionConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_default() {
        let config = SessionConfig::from_json_str("{}").unwrap();
        assert_eq!(config, SessionConfig::default());
    }

    #[test]
    fn partial_override() {
        let config =
            SessionConfig::from_json_str(r#"{ "starvation_damage": 5.5, "log_capacity": 10 }"#)
                .unwrap();
        assert_eq!(config.starvation_damage, 5.5);
        assert_eq!(config.log_capacity, 10);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = SessionConfig::from_json_str("{ seed: }").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = SessionConfig::load("/nonexistent/immortal.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
