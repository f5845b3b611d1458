//! Engine configuration.
//!
//! Configuration is plain data loaded from JSON. Every field has a default,
//! so an empty object is a valid configuration:
//!
//! ```json
//! {
//!   "kdf": { "rounds": 20000, "prf": "hmac-sha1" },
//!   "derived_key_type": "AES-128"
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{KeyEngineError, Result};
use crate::kdf::KdfParams;
use crate::key_type::{AesKeyLength, KeyType};
use crate::keys::CryptoKey;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Parameters for passphrase-derived keys.
    pub kdf: KdfParams,
    /// Key type produced by [`EngineConfig::derive_key`].
    pub derived_key_type: KeyType,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            kdf: KdfParams::default(),
            derived_key_type: KeyType::Aes(AesKeyLength::Aes128),
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| KeyEngineError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path.as_ref())
            .map_err(|e| KeyEngineError::InvalidConfig(e.to_string()))?;
        Self::from_json(&json)
    }

    /// Render the configuration as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| KeyEngineError::InvalidConfig(e.to_string()))
    }

    fn validate(&self) -> Result<()> {
        if self.kdf.rounds == 0 {
            return Err(KeyEngineError::InvalidConfig("kdf.rounds must be positive".into()));
        }
        Ok(())
    }

    /// Derive a key of the configured type from a passphrase and salt.
    pub fn derive_key(&self, passphrase: &str, salt: &str) -> Result<CryptoKey> {
        CryptoKey::derive_with(self.derived_key_type, passphrase, salt, &self.kdf)
    }
}
