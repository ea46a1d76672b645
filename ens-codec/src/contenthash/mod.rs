//! Content hash codec (EIP-1577).
//!
//! On-chain a content hash is `varint(multicodec) ++ payload`; off-chain it
//! is shown as `scheme://payload`.
//!
//! ```text
//! ipfs://bafybei...   ↔  e3 01 | 01 70 12 20 <sha2-256 digest>
//! bzz://d1de99...     ↔  e4 01 | 01 fa 01 1b 20 <keccak-256 digest>
//! ```
//!
//! Protocols live in an immutable [`ContentHashRegistry`]. Bytes carrying
//! a multicodec outside the registry decode to [`Protocol::Unknown`] with
//! their raw hex, never to an error.

mod cid;
mod protocol;

use alloy::primitives::hex;
use tracing::debug;

pub use protocol::Protocol;

use crate::error::ContentHashError;

/// A decoded content hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedContentHash {
    /// The protocol named by the multicodec prefix.
    pub protocol: Protocol,
    /// The payload in its display form, or `0x` hex for unknown protocols.
    pub decoded: String,
}

impl DecodedContentHash {
    /// Render as `scheme://payload`; unknown protocols render the raw hex.
    #[must_use]
    pub fn uri(&self) -> String {
        match self.protocol {
            Protocol::Unknown(_) => self.decoded.clone(),
            known => format!("{}://{}", known.scheme(), self.decoded),
        }
    }
}

/// The set of content hash protocols a codec understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentHashRegistry {
    protocols: Vec<Protocol>,
}

impl Default for ContentHashRegistry {
    fn default() -> Self {
        Self::new(Protocol::KNOWN)
    }
}

impl ContentHashRegistry {
    /// Build a registry from a list of protocols. [`Protocol::Unknown`]
    /// entries are ignored.
    #[must_use]
    pub fn new(protocols: impl IntoIterator<Item = Protocol>) -> Self {
        let mut list: Vec<Protocol> = Vec::new();
        for p in protocols {
            if !matches!(p, Protocol::Unknown(_)) && !list.contains(&p) {
                list.push(p);
            }
        }
        Self { protocols: list }
    }

    /// Whether `protocol` is registered.
    #[must_use]
    pub fn supports(&self, protocol: Protocol) -> bool {
        self.protocols.contains(&protocol)
    }

    /// Registered protocols in registration order.
    #[must_use]
    pub fn protocols(&self) -> &[Protocol] {
        &self.protocols
    }

    /// Encode a content URI to on-chain bytes.
    ///
    /// Accepts `scheme://payload`, `/ipfs/<cid>`, `/ipns/<name>` and a bare
    /// CID (taken as IPFS). The empty string encodes to empty bytes, which
    /// clears the record.
    ///
    /// # Errors
    ///
    /// Returns [`ContentHashError::UnsupportedProtocol`] for unregistered
    /// schemes and [`ContentHashError::InvalidPayload`] when the payload does
    /// not parse for its protocol.
    pub fn encode(&self, uri: &str) -> Result<Vec<u8>, ContentHashError> {
        if uri.is_empty() {
            return Ok(Vec::new());
        }
        let (protocol, payload) = self.match_protocol(uri)?;
        let body = protocol.encode_payload(payload)?;
        let mut out = Vec::with_capacity(body.len() + 4);
        cid::push_varint(&mut out, protocol.codec());
        out.extend_from_slice(&body);
        Ok(out)
    }

    /// Decode on-chain bytes. Empty input means no content hash.
    ///
    /// # Errors
    ///
    /// Returns an error for a malformed varint prefix or a payload that does
    /// not parse for a registered protocol.
    pub fn decode(&self, bytes: &[u8]) -> Result<Option<DecodedContentHash>, ContentHashError> {
        if bytes.is_empty() {
            return Ok(None);
        }
        let (codec, payload) = cid::read_varint(bytes).map_err(ContentHashError::Varint)?;
        let protocol = match Protocol::from_codec(codec) {
            p if self.supports(p) => p,
            _ => {
                debug!(codec, "unknown content hash codec");
                return Ok(Some(DecodedContentHash {
                    protocol: Protocol::Unknown(codec),
                    decoded: format!("0x{}", hex::encode(bytes)),
                }));
            }
        };
        let decoded = protocol.decode_payload(payload)?;
        Ok(Some(DecodedContentHash { protocol, decoded }))
    }

    fn match_protocol<'a>(&self, uri: &'a str) -> Result<(Protocol, &'a str), ContentHashError> {
        let (protocol, payload) = if let Some((scheme, payload)) = uri.split_once("://") {
            let protocol = Protocol::from_scheme(scheme)
                .ok_or_else(|| ContentHashError::UnsupportedProtocol(scheme.to_owned()))?;
            (protocol, payload)
        } else if let Some(payload) = uri.strip_prefix("/ipfs/") {
            (Protocol::Ipfs, payload)
        } else if let Some(payload) = uri.strip_prefix("/ipns/") {
            (Protocol::Ipns, payload)
        } else {
            match cid::Cid::parse(uri) {
                Ok(cid) if Protocol::Ipfs.accepts_bare_cid(cid.codec()) => (Protocol::Ipfs, uri),
                _ => return Err(ContentHashError::UnsupportedProtocol(uri.to_owned())),
            }
        };
        if self.supports(protocol) {
            Ok((protocol, payload))
        } else {
            Err(ContentHashError::UnsupportedProtocol(
                protocol.scheme().to_owned(),
            ))
        }
    }
}

/// Encode a content URI with the default registry.
///
/// # Errors
///
/// See [`ContentHashRegistry::encode`].
pub fn encode_content_hash(uri: &str) -> Result<Vec<u8>, ContentHashError> {
    ContentHashRegistry::default().encode(uri)
}

/// Decode on-chain content hash bytes with the default registry.
///
/// # Errors
///
/// See [`ContentHashRegistry::decode`].
pub fn decode_content_hash(bytes: &[u8]) -> Result<Option<DecodedContentHash>, ContentHashError> {
    ContentHashRegistry::default().decode(bytes)
}
