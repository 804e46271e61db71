use std::path::Path;

use chirp_store::{AccountRecord, Rent};
use chirp_types::Address;
use serde::{Deserialize, Serialize};

use crate::state::{Comment, Reaction, Tweet};

/// Label hashed into the default program id.
pub const DEFAULT_PROGRAM_LABEL: &str = "chirp-program-v1";

/// Configuration for a program instance.
///
/// Loaded from TOML:
///
/// ```toml
/// program_id = "5f0c...e1"   # 64 hex characters
///
/// [rent]
/// lamports_per_byte_year = 3480
/// exemption_threshold = 2.0
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgramConfig {
    /// Owner of every account the program creates; also salts every
    /// derived address so two deployments never share slots.
    #[serde(with = "hex_address")]
    pub program_id: Address,
    /// Deposit schedule for new records.
    pub rent: Rent,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            program_id: Address::from_label(DEFAULT_PROGRAM_LABEL),
            rent: Rent::default(),
        }
    }
}

impl ProgramConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&source)
    }

    /// Render as TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Reject configurations the program cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.program_id.is_null() {
            return Err(ConfigError::Invalid("program_id must not be null".into()));
        }
        if !(self.rent.exemption_threshold.is_finite() && self.rent.exemption_threshold > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "rent.exemption_threshold must be positive, got {}",
                self.rent.exemption_threshold
            )));
        }
        for space in [Tweet::SPACE, Reaction::SPACE, Comment::SPACE] {
            self.rent.minimum_balance(space).map_err(|e| {
                ConfigError::Invalid(format!(
                    "rent.lamports_per_byte_year = {} is unusable: {e}",
                    self.rent.lamports_per_byte_year
                ))
            })?;
        }
        Ok(())
    }
}

/// Errors from loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

mod hex_address {
    use chirp_types::Address;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(address: &Address, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&address.to_hex())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Address, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Address::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
