//! Engine configuration
//!
//! Every section has a `Default`, and missing keys fall back to it, so an
//! empty TOML document yields the default configuration.
//!
//! ```toml
//! [decoder]
//! echo_suppression = true
//!
//! [structure]
//! verify_invariants = false
//!
//! [session]
//! name_prefix = "CUBE"
//! outcome_channel_capacity = 256
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::session::{DEFAULT_NAME_PREFIX, DEFAULT_OUTCOME_CHANNEL_CAPACITY};

/// Errors loading or validating configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Packet decoder settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Drop a packet identical to the one decoded before it
    pub echo_suppression: bool,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            echo_suppression: true,
        }
    }
}

/// Structure engine settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructureConfig {
    /// Run the full invariant check after every applied operation
    pub verify_invariants: bool,
}

/// Device session settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Friendly names are `"{name_prefix} - {n}"`
    pub name_prefix: String,
    /// Bound of the outcome channel handed to consumers
    pub outcome_channel_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            name_prefix: DEFAULT_NAME_PREFIX.to_string(),
            outcome_channel_capacity: DEFAULT_OUTCOME_CHANNEL_CAPACITY,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub decoder: DecoderConfig,
    pub structure: StructureConfig,
    pub session: SessionConfig,
}

impl EngineConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(source)?;
        config.validate()?;
        log::debug!("[Config] Loaded {:?}", config);
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session.name_prefix.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "session.name_prefix",
                reason: "must not be empty".to_string(),
            });
        }
        if self.session.outcome_channel_capacity == 0 {
            return Err(ConfigError::Invalid {
                field: "session.outcome_channel_capacity",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        let config = EngineConfig::from_toml_str("").expect("empty config");
        assert_eq!(config, EngineConfig::default());
        assert!(config.decoder.echo_suppression);
        assert!(!config.structure.verify_invariants);
        assert_eq!(config.session.name_prefix, "CUBE");
    }

    #[test]
    fn test_partial_sections() {
        let config = EngineConfig::from_toml_str(
            r#"
            [decoder]
            echo_suppression = false

            [session]
            name_prefix = "LOGITOW"
            "#,
        )
        .expect("partial config");
        assert!(!config.decoder.echo_suppression);
        assert_eq!(config.session.name_prefix, "LOGITOW");
        assert_eq!(config.session.outcome_channel_capacity, 256);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = EngineConfig::from_toml_str("[session]\noutcome_channel_capacity = 0\n")
            .expect_err("zero capacity");
        assert!(matches!(err, ConfigError::Invalid { field: "session.outcome_channel_capacity", .. }));

        let err = EngineConfig::from_toml_str("[session]\nname_prefix = \"  \"\n").expect_err("blank prefix");
        assert!(err.to_string().contains("session.name_prefix"));

        assert!(matches!(
            EngineConfig::from_toml_str("[decoder]\necho_suppression = 3\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_toml_text_reloads() {
        let mut config = EngineConfig::default();
        config.structure.verify_invariants = true;
        let text = config.to_toml_string().expect("serialize");
        assert_eq!(EngineConfig::from_toml_str(&text).expect("reload"), config);
    }
}
