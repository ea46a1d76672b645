//! Codec configuration.
//!
//! ```toml
//! decode_mode = "strict"
//! long_labels = "escape"
//! coins = [7777, 81457]
//! ```
//!
//! Every field is optional. The resolved tables live in [`Registries`],
//! built once and shared read-only.

use serde::{Deserialize, Serialize};

use crate::coin::CoinRegistry;
use crate::contenthash::ContentHashRegistry;
use crate::error::ConfigError;
use crate::packet::LongLabels;
use crate::records::DecodeMode;

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CodecConfig {
    /// Default decode policy for resolver return data.
    #[serde(default)]
    pub decode_mode: DecodeMode,

    /// What the wire encoder does with labels over 255 bytes.
    #[serde(default)]
    pub long_labels: LongLabels,

    /// Extra EVM chain ids to register as ENSIP-11 coin types.
    #[serde(default)]
    pub coins: Vec<u64>,
}

impl CodecConfig {
    /// Parse a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] for malformed TOML or unknown keys.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Set the decode policy.
    #[must_use]
    pub const fn with_decode_mode(mut self, mode: DecodeMode) -> Self {
        self.decode_mode = mode;
        self
    }

    /// Set the long label policy.
    #[must_use]
    pub const fn with_long_labels(mut self, long_labels: LongLabels) -> Self {
        self.long_labels = long_labels;
        self
    }

    /// Register an extra EVM chain.
    #[must_use]
    pub fn with_coin(mut self, chain_id: u64) -> Self {
        self.coins.push(chain_id);
        self
    }
}

/// Immutable lookup tables shared by every decode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registries {
    /// Content hash protocols.
    pub content_hash: ContentHashRegistry,
    /// Coin types for address records.
    pub coins: CoinRegistry,
}

impl Registries {
    /// Resolve the tables described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ChainId`] for a chain id with no coin type.
    pub fn from_config(config: &CodecConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            content_hash: ContentHashRegistry::default(),
            coins: CoinRegistry::with_evm_chains(config.coins.iter().copied())?,
        })
    }
}
