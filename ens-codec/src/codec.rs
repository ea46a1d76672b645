//! The [`EnsCodec`] facade.
//!
//! Bundles a [`CodecConfig`], its resolved [`Registries`] and a
//! [`Normalize`] implementation so callers work with names instead of raw
//! namehashes.
//!
//! ```rust,ignore
//! let codec = EnsCodec::default();
//! let calls = [codec.text("nick.eth", "url")?, codec.addr("nick.eth", 60)?];
//! let data = codec.build_batch(MULTICALL3, &calls, false);
//! // ... eth_call ...
//! let values = codec.decode_batch(&output, &calls)?;
//! ```

use std::sync::Arc;

use alloy::primitives::{Address, B256, Bytes};

use crate::config::{CodecConfig, Registries};
use crate::contenthash::DecodedContentHash;
use crate::error::{ConfigError, ContentHashError, DecodeError, NameError, PacketError, RecordError};
use crate::multicall::{self, BatchResult};
use crate::namehash;
use crate::normalize::{BasicNormalizer, Normalize};
use crate::packet;
use crate::records::{AbiContentTypes, AbiRecord, RecordCall, RecordValue};

/// Name, packet, content hash and record codecs under one configuration.
#[derive(Debug, Clone)]
pub struct EnsCodec {
    config: CodecConfig,
    registries: Registries,
    normalizer: Arc<dyn Normalize>,
}

impl Default for EnsCodec {
    fn default() -> Self {
        Self {
            config: CodecConfig::default(),
            registries: Registries::default(),
            normalizer: Arc::new(BasicNormalizer),
        }
    }
}

impl EnsCodec {
    /// Create a codec from `config` with the [`BasicNormalizer`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the registries cannot be built.
    pub fn new(config: CodecConfig) -> Result<Self, ConfigError> {
        let registries = Registries::from_config(&config)?;
        Ok(Self {
            config,
            registries,
            normalizer: Arc::new(BasicNormalizer),
        })
    }

    /// Create a codec from a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for malformed TOML or an invalid coin entry.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Self::new(CodecConfig::from_toml_str(s)?)
    }

    /// Replace the normalizer.
    #[must_use]
    pub fn with_normalizer(mut self, normalizer: impl Normalize + 'static) -> Self {
        self.normalizer = Arc::new(normalizer);
        self
    }

    /// The configuration.
    #[must_use]
    pub const fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// The resolved registries.
    #[must_use]
    pub const fn registries(&self) -> &Registries {
        &self.registries
    }

    /// The normalizer in use.
    #[must_use]
    pub fn normalizer(&self) -> &dyn Normalize {
        self.normalizer.as_ref()
    }

    /// Namehash of `name`.
    ///
    /// # Errors
    ///
    /// See [`namehash::namehash`].
    pub fn namehash(&self, name: &str) -> Result<B256, NameError> {
        namehash::namehash(name, self.normalizer())
    }

    /// Hash of a single label.
    ///
    /// # Errors
    ///
    /// See [`namehash::labelhash`].
    pub fn labelhash(&self, label: &str) -> Result<B256, NameError> {
        namehash::labelhash(label, self.normalizer())
    }

    /// Normalize and validate `name`.
    ///
    /// # Errors
    ///
    /// See [`namehash::validate_name`].
    pub fn validate_name(&self, name: &str) -> Result<String, NameError> {
        namehash::validate_name(name, self.normalizer())
    }

    /// Encode `name` as a wire packet under the configured long label policy.
    ///
    /// # Errors
    ///
    /// See [`packet::packet_to_bytes_with`].
    pub fn packet_to_bytes(&self, name: &str) -> Result<Vec<u8>, PacketError> {
        packet::packet_to_bytes_with(name, self.config.long_labels)
    }

    /// Decode a wire packet.
    ///
    /// # Errors
    ///
    /// See [`packet::bytes_to_packet`].
    pub fn bytes_to_packet(&self, bytes: &[u8]) -> Result<String, PacketError> {
        packet::bytes_to_packet(bytes)
    }

    /// Encode a content URI.
    ///
    /// # Errors
    ///
    /// See [`ContentHashRegistry::encode`](crate::ContentHashRegistry::encode).
    pub fn encode_content_hash(&self, uri: &str) -> Result<Vec<u8>, ContentHashError> {
        self.registries.content_hash.encode(uri)
    }

    /// Decode on-chain content hash bytes.
    ///
    /// # Errors
    ///
    /// See [`ContentHashRegistry::decode`](crate::ContentHashRegistry::decode).
    pub fn decode_content_hash(
        &self,
        bytes: &[u8],
    ) -> Result<Option<DecodedContentHash>, ContentHashError> {
        self.registries.content_hash.decode(bytes)
    }

    /// Read a text record of `name`.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Name`] if `name` cannot be hashed.
    pub fn text(&self, name: &str, key: &str) -> Result<RecordCall, RecordError> {
        Ok(RecordCall::text(self.namehash(name)?, key))
    }

    /// Write a text record of `name`; `None` deletes it.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Name`] if `name` cannot be hashed.
    pub fn set_text(&self, name: &str, key: &str, value: Option<&str>) -> Result<RecordCall, RecordError> {
        Ok(RecordCall::set_text(self.namehash(name)?, key, value))
    }

    /// Read an address record of `name`.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Name`] if `name` cannot be hashed.
    pub fn addr(&self, name: &str, coin_type: u64) -> Result<RecordCall, RecordError> {
        Ok(RecordCall::addr(self.namehash(name)?, coin_type))
    }

    /// Write an address record of `name` from its display form. `None`
    /// deletes the record.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Name`] if `name` cannot be hashed and
    /// [`RecordError::InvalidAddress`] if `address` does not parse for the
    /// coin.
    pub fn set_addr(
        &self,
        name: &str,
        coin_type: u64,
        address: Option<&str>,
    ) -> Result<RecordCall, RecordError> {
        let node = self.namehash(name)?;
        let bytes = match address {
            Some(address) => self.registries.coins.encode(coin_type, address)?,
            None => Vec::new(),
        };
        Ok(RecordCall::set_addr(node, coin_type, bytes))
    }

    /// Read the content hash of `name`.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Name`] if `name` cannot be hashed.
    pub fn content_hash(&self, name: &str) -> Result<RecordCall, RecordError> {
        Ok(RecordCall::content_hash(self.namehash(name)?))
    }

    /// Write the content hash of `name` from a URI; `""` deletes it.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Name`] or [`RecordError::ContentHash`].
    pub fn set_content_hash(&self, name: &str, uri: &str) -> Result<RecordCall, RecordError> {
        let node = self.namehash(name)?;
        Ok(RecordCall::set_content_hash(node, self.encode_content_hash(uri)?))
    }

    /// Read an ABI record of `name`.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Name`] if `name` cannot be hashed.
    pub fn abi(&self, name: &str, content_types: AbiContentTypes) -> Result<RecordCall, RecordError> {
        Ok(RecordCall::abi(self.namehash(name)?, content_types))
    }

    /// Write an ABI record of `name`.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Name`] or [`RecordError::InvalidAbi`].
    pub fn set_abi(&self, name: &str, record: &AbiRecord) -> Result<RecordCall, RecordError> {
        RecordCall::set_abi(self.namehash(name)?, record)
    }

    /// Delete every record of `name`.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Name`] if `name` cannot be hashed.
    pub fn clear_records(&self, name: &str) -> Result<RecordCall, RecordError> {
        Ok(RecordCall::clear_records(self.namehash(name)?))
    }

    /// Decode the return data of one call under the configured mode.
    ///
    /// # Errors
    ///
    /// See [`RecordCall::decode`].
    pub fn decode(&self, call: &RecordCall, data: &[u8]) -> Result<Option<RecordValue>, DecodeError> {
        call.decode(data, &self.registries, self.config.decode_mode)
    }

    /// Encode a `tryAggregate` batch.
    #[must_use]
    pub fn build_batch(&self, target: Address, calls: &[RecordCall], require_success: bool) -> Bytes {
        multicall::build_batch(target, calls, require_success)
    }

    /// Decode a `tryAggregate` return under the configured mode.
    ///
    /// # Errors
    ///
    /// See [`multicall::decode_batch`].
    pub fn decode_batch(
        &self,
        data: &[u8],
        calls: &[RecordCall],
    ) -> Result<Vec<Option<RecordValue>>, DecodeError> {
        multicall::decode_batch(data, calls, &self.registries, self.config.decode_mode)
    }

    /// Decode per-call results under the configured mode.
    ///
    /// # Errors
    ///
    /// See [`multicall::decode_batch_results`].
    pub fn decode_batch_results(
        &self,
        results: &[BatchResult],
        calls: &[RecordCall],
    ) -> Result<Vec<Option<RecordValue>>, DecodeError> {
        multicall::decode_batch_results(results, calls, &self.registries, self.config.decode_mode)
    }

    /// Encode a resolver `multicall(bytes[])` for writes.
    #[must_use]
    pub fn build_resolver_multicall(&self, calls: &[RecordCall]) -> Bytes {
        multicall::build_resolver_multicall(calls)
    }
}
