//! ENS codecs: names, wire packets, content hashes and resolver records.
//!
//! This crate turns human-readable ENS names and record values into the
//! bytes a resolver contract consumes, and turns resolver output back into
//! typed values. It performs no network I/O.
//!
//! - [`namehash`] hashes names and labels (EIP-137), including the
//!   `[<64 hex>]` Encoded Label escape for pre-hashed labels.
//! - [`packet`] converts names to and from DNS wire format (ENSIP-10).
//! - [`contenthash`] encodes and decodes EIP-1577 content hashes.
//! - [`records`] builds resolver calls and decodes their return data.
//! - [`multicall`] batches calls and decodes per-call success or failure.
//!
//! [`EnsCodec`] ties them together under one [`CodecConfig`].

pub mod codec;
pub mod coin;
pub mod config;
pub mod contenthash;
pub mod error;
pub mod label;
pub mod multicall;
pub mod namehash;
pub mod normalize;
pub mod packet;
pub mod records;

pub use codec::EnsCodec;
pub use coin::{CoinRegistry, DecodedAddress};
pub use config::{CodecConfig, Registries};
pub use contenthash::{ContentHashRegistry, DecodedContentHash, Protocol};
pub use error::{
    ConfigError, ContentHashError, DecodeError, Error, NameError, NormalizeError, PacketError,
    RecordError, Result,
};
pub use label::Label;
pub use multicall::BatchResult;
pub use normalize::{BasicNormalizer, Normalize};
pub use packet::LongLabels;
pub use records::{AddrShape, DecodeMode, RecordCall, RecordValue};
