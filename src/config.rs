use crate::tree::{Delimiter, EmptyPathPolicy, OrderingPolicy};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Builder configuration, stored as JSON
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct BuilderConfig {
    /// Delimiter used to split paths ("auto" detects it per entry)
    #[serde(default)]
    pub delimiter: DelimiterSetting,

    /// Child ordering: "insertion_order" or "sorted"
    #[serde(default)]
    pub ordering: OrderingPolicy,

    /// Handling of raw paths that contain only delimiters
    #[serde(default)]
    pub empty_paths: EmptyPathPolicy,

    /// Emit `selectable: true` on every node
    #[serde(default)]
    pub selectable: bool,
}

/// Delimiter choice as written in the config file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DelimiterSetting {
    #[default]
    Auto,
    Slash,
    Dot,
    Custom(char),
}

impl DelimiterSetting {
    /// Batch-wide delimiter, or `None` for per-entry detection
    pub fn resolve(self) -> Option<Delimiter> {
        match self {
            DelimiterSetting::Auto => None,
            DelimiterSetting::Slash => Some(Delimiter::Slash),
            DelimiterSetting::Dot => Some(Delimiter::Dot),
            DelimiterSetting::Custom(c) => Some(Delimiter::from_char(c)),
        }
    }

    /// Parse a command line value: "auto", "slash", "dot", or a single character
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let setting = match s {
            "auto" => DelimiterSetting::Auto,
            "slash" | "/" => DelimiterSetting::Slash,
            "dot" | "." => DelimiterSetting::Dot,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => DelimiterSetting::Custom(c),
                    _ => {
                        return Err(ConfigError::ValidationError(format!(
                            "delimiter must be auto, slash, dot or a single character, got {other:?}"
                        )))
                    }
                }
            }
        };
        Ok(setting)
    }
}

impl BuilderConfig {
    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        let config: BuilderConfig =
            serde_json::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(path.as_ref(), contents).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let DelimiterSetting::Custom(c) = self.delimiter {
            if c.is_whitespace() {
                return Err(ConfigError::ValidationError(
                    "custom delimiter cannot be whitespace".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// JSON Schema describing the config file
pub fn config_schema() -> schemars::Schema {
    schemars::schema_for!(BuilderConfig)
}

/// Configuration error types
#[derive(Debug)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(msg) => write!(f, "IO error: {msg}"),
            ConfigError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            ConfigError::SerializeError(msg) => write!(f, "Serialize error: {msg}"),
            ConfigError::ValidationError(msg) => write!(f, "Validation error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}
