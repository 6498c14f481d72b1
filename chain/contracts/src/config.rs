//! Engine configuration
//!
//! Fixed at construction. There is no setter: once deployed, nobody can
//! change which oracle resolves draws or how randomness is requested.

use serde::{Deserialize, Serialize};
use types::ids::Address;

use crate::errors::ConfigError;
use crate::oracle::RandomnessRequest;

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// The only principal allowed to call `fulfill`
    pub oracle: Address,
    /// Parameters attached to each randomness request
    #[serde(default)]
    pub request: RandomnessRequest,
}

impl EngineConfig {
    /// Configuration with default request parameters.
    pub fn new(oracle: Address) -> Self {
        Self {
            oracle,
            request: RandomnessRequest::default(),
        }
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.oracle.is_null() {
            return Err(ConfigError::NullOracle);
        }
        if self.request.num_words == 0 {
            return Err(ConfigError::NoWords);
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
