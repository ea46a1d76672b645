//! Coin types for multi-coin address records (ENSIP-9, ENSIP-11).
//!
//! ETH keeps its SLIP-44 coin type (60). Every other EVM chain is addressed
//! as `0x8000_0000 | chain_id`. Coins outside the registry are carried as raw
//! bytes and shown as `0x` hex.

use std::collections::BTreeMap;
use std::fmt;

use alloy::primitives::{Address, hex};

use crate::error::{ConfigError, RecordError};

/// SLIP-44 coin type of Ether.
pub const ETH_COIN_TYPE: u64 = 60;

/// Bit marking an ENSIP-11 EVM coin type.
pub const EVM_BIT: u64 = 0x8000_0000;

/// Well-known EVM chains: `(chain id, name)`.
const EVM_CHAINS: &[(u64, &str)] = &[
    (10, "optimism"),
    (56, "bsc"),
    (100, "gnosis"),
    (137, "polygon"),
    (143, "monad"),
    (250, "fantom"),
    (324, "zksync"),
    (8453, "base"),
    (42_161, "arbitrum"),
    (43_114, "avalanche"),
    (59_144, "linea"),
    (534_352, "scroll"),
    (11_155_111, "sepolia"),
];

/// Map an EVM chain id to its ENSIP-11 coin type.
///
/// Chain id 1 maps to [`ETH_COIN_TYPE`].
///
/// # Errors
///
/// Returns [`ConfigError::ChainId`] when the id does not fit below the EVM
/// bit.
pub fn evm_coin_type(chain_id: u64) -> Result<u64, ConfigError> {
    if chain_id == 1 {
        Ok(ETH_COIN_TYPE)
    } else if chain_id >= EVM_BIT {
        Err(ConfigError::ChainId(chain_id))
    } else {
        Ok(EVM_BIT | chain_id)
    }
}

/// How a coin's address bytes are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoinFormat {
    /// 20-byte EVM address, EIP-55 checksummed.
    Evm,
    /// Unknown coin: `0x` hex of the raw bytes.
    Raw,
}

/// A decoded address record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedAddress {
    /// The coin type the record was read for.
    pub coin_type: u64,
    /// Registry name, or `None` for unregistered coins.
    pub coin: Option<String>,
    /// The address in display form.
    pub value: String,
}

impl fmt::Display for DecodedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// Immutable lookup from coin type to name and address format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoinRegistry {
    coins: BTreeMap<u64, String>,
}

impl Default for CoinRegistry {
    fn default() -> Self {
        let mut coins = BTreeMap::new();
        coins.insert(ETH_COIN_TYPE, "eth".to_owned());
        for (chain_id, name) in EVM_CHAINS {
            coins.insert(EVM_BIT | chain_id, (*name).to_owned());
        }
        Self { coins }
    }
}

impl CoinRegistry {
    /// The default registry plus extra EVM chains, named `evm-<id>`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ChainId`] for a chain id that has no coin type.
    pub fn with_evm_chains(chain_ids: impl IntoIterator<Item = u64>) -> Result<Self, ConfigError> {
        let mut registry = Self::default();
        for chain_id in chain_ids {
            let coin_type = evm_coin_type(chain_id)?;
            registry
                .coins
                .entry(coin_type)
                .or_insert_with(|| format!("evm-{chain_id}"));
        }
        Ok(registry)
    }

    /// Registry name for a coin type.
    #[must_use]
    pub fn name(&self, coin_type: u64) -> Option<&str> {
        self.coins.get(&coin_type).map(String::as_str)
    }

    /// Coin type registered under `name`.
    #[must_use]
    pub fn coin_type(&self, name: &str) -> Option<u64> {
        self.coins
            .iter()
            .find_map(|(coin_type, n)| (n == name).then_some(*coin_type))
    }

    /// Address format for a coin type.
    #[must_use]
    pub fn format(&self, coin_type: u64) -> CoinFormat {
        if self.coins.contains_key(&coin_type) {
            CoinFormat::Evm
        } else {
            CoinFormat::Raw
        }
    }

    /// Parse a display address into record bytes.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::InvalidAddress`] when the text does not parse
    /// for the coin's format.
    pub fn encode(&self, coin_type: u64, address: &str) -> Result<Vec<u8>, RecordError> {
        match self.format(coin_type) {
            CoinFormat::Evm => address
                .parse::<Address>()
                .map(|a| a.to_vec())
                .map_err(|e| RecordError::invalid_address(coin_type, e.to_string())),
            CoinFormat::Raw => {
                let hex_part = address.strip_prefix("0x").ok_or_else(|| {
                    RecordError::invalid_address(coin_type, "unregistered coin expects 0x hex")
                })?;
                hex::decode(hex_part).map_err(|e| RecordError::invalid_address(coin_type, e.to_string()))
            }
        }
    }

    /// Render record bytes for display.
    ///
    /// Bytes that do not fit the coin's format fall back to `0x` hex rather
    /// than failing.
    #[must_use]
    pub fn decode(&self, coin_type: u64, bytes: &[u8]) -> DecodedAddress {
        let value = match self.format(coin_type) {
            CoinFormat::Evm if bytes.len() == 20 => Address::from_slice(bytes).to_checksum(None),
            _ => format!("0x{}", hex::encode(bytes)),
        };
        DecodedAddress {
            coin_type,
            coin: self.name(coin_type).map(str::to_owned),
            value,
        }
    }
}
