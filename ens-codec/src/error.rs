//! Error types for the ENS codecs.
//!
//! Errors are split by the boundary they guard:
//! - [`NameError`] and [`NormalizeError`] for labels and dotted names
//! - [`PacketError`] for DNS wire packets
//! - [`ContentHashError`] for content hash URIs and multicodec bytes
//! - [`RecordError`] for building resolver calls
//! - [`DecodeError`] for untrusted bytes coming back from a resolver
//!
//! All of them fold into the crate-wide [`Error`].

use alloy::primitives::Bytes;

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the crate.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Label or name validation error.
    #[error("Name error: {0}")]
    Name(#[from] NameError),

    /// Wire packet error.
    #[error("Packet error: {0}")]
    Packet(#[from] PacketError),

    /// Content hash error.
    #[error("Content hash error: {0}")]
    ContentHash(#[from] ContentHashError),

    /// Resolver call construction error.
    #[error("Record error: {0}")]
    Record(#[from] RecordError),

    /// Decode error on resolver return data.
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// A label was rejected by the external normalizer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot normalize label {label:?}: {reason}")]
pub struct NormalizeError {
    /// The offending label.
    pub label: String,
    /// Why the label was rejected.
    pub reason: String,
}

impl NormalizeError {
    /// Create a normalization error for `label`.
    #[must_use]
    pub fn new(label: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            reason: reason.into(),
        }
    }
}

/// Error type for label and name validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum NameError {
    /// A bracketed label that does not wrap exactly 64 hex characters.
    #[error("invalid encoded label {label:?}: {reason}")]
    InvalidEncodedLabel {
        /// The offending label.
        label: String,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// A label longer than 255 bytes once UTF-8 encoded.
    #[error("label is {len} bytes long, the limit is 255")]
    LabelTooLong {
        /// The offending label.
        label: String,
        /// Its UTF-8 byte length.
        len: usize,
    },

    /// A non-root name with an empty label (`"a..b"`, `".eth"`).
    #[error("name {name:?} contains an empty label")]
    NameWithEmptyLabels {
        /// The offending name.
        name: String,
    },

    /// `[root]` used together with other labels.
    #[error("name {name:?} uses [root] alongside other labels")]
    RootNameIncludesOtherLabels {
        /// The offending name.
        name: String,
    },

    /// The normalizer rejected a label.
    #[error(transparent)]
    Normalize(#[from] NormalizeError),
}

impl NameError {
    /// Create an invalid encoded label error.
    #[must_use]
    pub fn invalid_encoded_label(label: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidEncodedLabel {
            label: label.into(),
            reason,
        }
    }
}

/// Error type for the DNS wire packet codec.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum PacketError {
    /// Invalid name on the encoding side.
    #[error(transparent)]
    Name(#[from] NameError),

    /// A length byte points past the end of the input.
    #[error("label at offset {offset} runs past the end of the packet")]
    ShortInput {
        /// Offset of the length byte.
        offset: usize,
    },

    /// The input ended before the zero-length root label.
    #[error("packet is missing its root terminator")]
    MissingTerminator,

    /// Bytes follow the root terminator.
    #[error("{count} trailing bytes after the root terminator")]
    TrailingBytes {
        /// Number of bytes after the terminator.
        count: usize,
    },

    /// A label is not valid UTF-8.
    #[error("label at offset {offset} is not valid UTF-8")]
    InvalidUtf8 {
        /// Offset of the length byte.
        offset: usize,
    },
}

/// Error type for content hash encoding and decoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ContentHashError {
    /// The URI names no supported protocol and none can be inferred.
    #[error("unsupported content hash protocol: {0}")]
    UnsupportedProtocol(String),

    /// The payload cannot be parsed or rendered for its protocol.
    #[error("invalid {protocol} content hash: {reason}")]
    InvalidPayload {
        /// Protocol name (`ipfs`, `bzz`, ...).
        protocol: &'static str,
        /// What went wrong.
        reason: String,
    },

    /// The multicodec varint prefix is malformed.
    #[error("malformed multicodec prefix: {0}")]
    Varint(String),
}

impl ContentHashError {
    /// Create an invalid payload error.
    #[must_use]
    pub fn invalid_payload(protocol: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidPayload {
            protocol,
            reason: reason.into(),
        }
    }
}

/// Error type for building resolver calls.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum RecordError {
    /// The name could not be hashed.
    #[error(transparent)]
    Name(#[from] NameError),

    /// The content hash URI could not be encoded.
    #[error(transparent)]
    ContentHash(#[from] ContentHashError),

    /// The address string does not parse for its coin type.
    #[error("invalid address for coin type {coin_type}: {reason}")]
    InvalidAddress {
        /// Target coin type.
        coin_type: u64,
        /// What went wrong.
        reason: String,
    },

    /// An ABI record payload could not be serialized.
    #[error("invalid ABI record: {0}")]
    InvalidAbi(String),
}

impl RecordError {
    /// Create an invalid address error.
    #[must_use]
    pub fn invalid_address(coin_type: u64, reason: impl Into<String>) -> Self {
        Self::InvalidAddress {
            coin_type,
            reason: reason.into(),
        }
    }
}

/// Error type for decoding resolver return data.
///
/// The source error is kept as-is so strict callers see exactly what the
/// underlying decoder reported.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DecodeError {
    /// ABI decoding failed.
    #[error(transparent)]
    Abi(#[from] alloy::sol_types::Error),

    /// A content hash payload is malformed.
    #[error(transparent)]
    ContentHash(#[from] ContentHashError),

    /// A JSON ABI record is not valid JSON.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// A URI ABI record is not valid UTF-8.
    #[error("ABI record URI is not valid UTF-8")]
    InvalidUri,

    /// A failed call whose return data nevertheless decoded.
    #[error("call {index} failed with return data {data}")]
    CallFailed {
        /// Index in the batch.
        index: usize,
        /// Raw revert data.
        data: Bytes,
    },

    /// The aggregate returned a different number of results than calls sent.
    #[error("batch returned {actual} results for {expected} calls")]
    BatchLength {
        /// Number of calls sent.
        expected: usize,
        /// Number of results received.
        actual: usize,
    },
}

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// TOML parse error.
    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    /// A coin entry is out of range.
    #[error("chain id {0} cannot be mapped to an ENSIP-11 coin type")]
    ChainId(u64),
}
