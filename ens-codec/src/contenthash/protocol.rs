//! Supported content hash protocols and their payload transforms.

use std::fmt;

use alloy::primitives::hex;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use multibase::Base;

use super::cid::{Cid, DAG_PB, KECCAK_256, LIBP2P_KEY, SWARM_MANIFEST};
use crate::error::ContentHashError;

/// A content hash protocol, identified on-chain by its multicodec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protocol {
    /// IPFS (`ipfs-ns`, 0xe3).
    Ipfs,
    /// IPNS (`ipns-ns`, 0xe5).
    Ipns,
    /// Swarm (`swarm-ns`, 0xe4).
    Swarm,
    /// Tor onion service v2 (`onion`, 0x01bc).
    Onion,
    /// Tor onion service v3 (`onion3`, 0x01bd).
    Onion3,
    /// Skynet (`skynet-ns`, 0xb19910).
    Skynet,
    /// Arweave (`arweave-ns`, 0xb29910).
    Arweave,
    /// A codec this crate does not know.
    Unknown(u64),
}

impl Protocol {
    /// Every protocol with a payload transform.
    pub const KNOWN: [Self; 7] = [
        Self::Ipfs,
        Self::Ipns,
        Self::Swarm,
        Self::Onion,
        Self::Onion3,
        Self::Skynet,
        Self::Arweave,
    ];

    /// The multicodec value.
    #[must_use]
    pub const fn codec(self) -> u64 {
        match self {
            Self::Ipfs => 0xe3,
            Self::Ipns => 0xe5,
            Self::Swarm => 0xe4,
            Self::Onion => 0x01bc,
            Self::Onion3 => 0x01bd,
            Self::Skynet => 0x00b1_9910,
            Self::Arweave => 0x00b2_9910,
            Self::Unknown(codec) => codec,
        }
    }

    /// The URI scheme used for display.
    #[must_use]
    pub const fn scheme(self) -> &'static str {
        match self {
            Self::Ipfs => "ipfs",
            Self::Ipns => "ipns",
            Self::Swarm => "bzz",
            Self::Onion => "onion",
            Self::Onion3 => "onion3",
            Self::Skynet => "sia",
            Self::Arweave => "ar",
            Self::Unknown(_) => "unknown",
        }
    }

    /// Look up a protocol by URI scheme. `arweave` is accepted for `ar`.
    #[must_use]
    pub fn from_scheme(scheme: &str) -> Option<Self> {
        match scheme {
            "arweave" => Some(Self::Arweave),
            _ => Self::KNOWN.into_iter().find(|p| p.scheme() == scheme),
        }
    }

    /// Look up a protocol by multicodec; unknown codecs map to
    /// [`Protocol::Unknown`].
    #[must_use]
    pub fn from_codec(codec: u64) -> Self {
        Self::KNOWN
            .into_iter()
            .find(|p| p.codec() == codec)
            .unwrap_or(Self::Unknown(codec))
    }

    /// Turn a display payload into its on-chain bytes (without the codec).
    pub(crate) fn encode_payload(self, payload: &str) -> Result<Vec<u8>, ContentHashError> {
        let name = self.scheme();
        let invalid = |reason: String| ContentHashError::invalid_payload(name, reason);
        match self {
            Self::Ipfs => {
                let cid = Cid::parse(payload).map_err(invalid)?;
                Ok(cid.into_v1().to_bytes())
            }
            Self::Ipns => {
                let cid = if payload.starts_with("Qm") || payload.starts_with('1') {
                    Cid::from_peer_id(payload, LIBP2P_KEY)
                } else {
                    Cid::parse(payload).map(|cid| cid.with_codec(LIBP2P_KEY))
                }
                .map_err(invalid)?;
                Ok(cid.to_bytes())
            }
            Self::Swarm => {
                let digest = hex::decode(payload).map_err(|e| invalid(e.to_string()))?;
                if digest.len() != 32 {
                    return Err(invalid(format!(
                        "expected a 32-byte hash, got {} bytes",
                        digest.len()
                    )));
                }
                Ok(Cid::v1_with_digest(SWARM_MANIFEST, KECCAK_256, &digest).to_bytes())
            }
            Self::Onion => ascii_payload(payload, 16).map_err(invalid),
            Self::Onion3 => ascii_payload(payload, 56).map_err(invalid),
            Self::Skynet => base64_payload(payload, 46).map_err(invalid),
            Self::Arweave => base64_payload(payload, 43).map_err(invalid),
            Self::Unknown(codec) => Err(ContentHashError::UnsupportedProtocol(format!(
                "codec {codec:#x}"
            ))),
        }
    }

    /// Turn on-chain payload bytes (after the codec) into display text.
    pub(crate) fn decode_payload(self, bytes: &[u8]) -> Result<String, ContentHashError> {
        let name = self.scheme();
        let invalid = |reason: String| ContentHashError::invalid_payload(name, reason);
        match self {
            Self::Ipfs => {
                let cid = Cid::from_bytes(bytes).map_err(invalid)?;
                Ok(cid.into_v1().to_string_of_base(Base::Base32Lower))
            }
            Self::Ipns => {
                let cid = Cid::from_bytes(bytes).map_err(invalid)?;
                Ok(cid.into_v1().to_string_of_base(Base::Base36Lower))
            }
            Self::Swarm => {
                let cid = Cid::from_bytes(bytes).map_err(invalid)?;
                let (code, digest) = cid.digest().map_err(invalid)?;
                if code != KECCAK_256 {
                    return Err(invalid(format!("expected a keccak-256 multihash, got {code:#x}")));
                }
                Ok(hex::encode(digest))
            }
            Self::Onion | Self::Onion3 => String::from_utf8(bytes.to_vec())
                .map_err(|_| invalid("address is not valid UTF-8".to_owned())),
            Self::Skynet | Self::Arweave => Ok(URL_SAFE_NO_PAD.encode(bytes)),
            Self::Unknown(_) => Ok(format!("0x{}", hex::encode(bytes))),
        }
    }

    /// Whether a CID with `codec` belongs under this protocol when the URI
    /// carries no scheme.
    pub(crate) const fn accepts_bare_cid(self, codec: u64) -> bool {
        matches!(self, Self::Ipfs) && codec == DAG_PB
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(codec) => write!(f, "unknown({codec:#x})"),
            known => f.write_str(known.scheme()),
        }
    }
}

fn ascii_payload(payload: &str, len: usize) -> Result<Vec<u8>, String> {
    if payload.len() != len || !payload.is_ascii() {
        return Err(format!("expected {len} ASCII characters"));
    }
    Ok(payload.as_bytes().to_vec())
}

fn base64_payload(payload: &str, len: usize) -> Result<Vec<u8>, String> {
    if payload.len() != len {
        return Err(format!("expected {len} base64url characters"));
    }
    URL_SAFE_NO_PAD.decode(payload).map_err(|e| e.to_string())
}
