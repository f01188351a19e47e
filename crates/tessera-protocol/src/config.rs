//! Session configuration loaded from TOML.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tessera_core::PromotionPiece;
use thiserror::Error;

/// Errors that can occur when loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// The file is not valid TOML for [`EngineConfig`].
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// `search_depth` must be at least one.
    #[error("search_depth must be at least 1")]
    ZeroDepth,
    /// `auto_promotion` does not name a promotion piece.
    #[error("unknown auto_promotion piece '{0}'")]
    UnknownPromotion(String),
}

/// Engine settings for one protocol session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Fixed search depth for `enginego`. Defaults to 3.
    #[serde(default = "default_search_depth")]
    pub search_depth: u32,
    /// Piece the engine promotes to. Defaults to "queen".
    #[serde(default = "default_auto_promotion")]
    pub auto_promotion: String,
}

fn default_search_depth() -> u32 {
    3
}

fn default_auto_promotion() -> String {
    "queen".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            search_depth: default_search_depth(),
            auto_promotion: default_auto_promotion(),
        }
    }
}

impl EngineConfig {
    /// Parses and validates a TOML document. Missing keys take defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Checks the values and returns the engine's promotion piece.
    pub fn validate(&self) -> Result<PromotionPiece, ConfigError> {
        if self.search_depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        self.auto_promotion
            .parse()
            .map_err(|_| ConfigError::UnknownPromotion(self.auto_promotion.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.search_depth, 3);
        assert_eq!(config.validate().unwrap(), PromotionPiece::Queen);
    }

    #[test]
    fn parse_values() {
        let config = EngineConfig::from_toml_str(
            r#"
search_depth = 4
auto_promotion = "knight"
"#,
        )
        .unwrap();
        assert_eq!(config.search_depth, 4);
        assert_eq!(config.validate().unwrap(), PromotionPiece::Knight);
    }

    #[test]
    fn rejects_zero_depth() {
        let result = EngineConfig::from_toml_str("search_depth = 0");
        assert!(matches!(result, Err(ConfigError::ZeroDepth)));
    }

    #[test]
    fn rejects_unknown_piece() {
        let result = EngineConfig::from_toml_str(r#"auto_promotion = "king""#);
        assert!(matches!(result, Err(ConfigError::UnknownPromotion(ref p)) if p == "king"));
    }

    #[test]
    fn rejects_bad_toml() {
        let result = EngineConfig::from_toml_str("search_depth = \"deep\"");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn missing_file() {
        let result = EngineConfig::load("/nonexistent/tessera.toml");
        assert!(matches!(result, Err(ConfigError::ReadError(_))));
    }
}
