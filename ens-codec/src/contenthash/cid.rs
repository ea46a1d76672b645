//! Just enough CID handling for content hashes.
//!
//! ```text
//! CIDv0 = multihash                                  ("Qm..." base58btc)
//! CIDv1 = varint(1) varint(codec) multihash          (multibase string)
//! multihash = varint(code) varint(len) digest[len]
//! ```

use multibase::Base;
use unsigned_varint::{decode, encode};

/// Multicodec for `dag-pb`, the only codec a CIDv0 can carry.
pub(crate) const DAG_PB: u64 = 0x70;
/// Multicodec for `libp2p-key`, used by IPNS names.
pub(crate) const LIBP2P_KEY: u64 = 0x72;
/// Multicodec for `swarm-manifest`.
pub(crate) const SWARM_MANIFEST: u64 = 0xfa;
/// Multihash code for keccak-256.
pub(crate) const KECCAK_256: u64 = 0x1b;
/// Multihash code for sha2-256.
const SHA2_256: u64 = 0x12;

/// Append the unsigned varint encoding of `value`.
pub(crate) fn push_varint(out: &mut Vec<u8>, value: u64) {
    let mut buf = encode::u64_buffer();
    out.extend_from_slice(encode::u64(value, &mut buf));
}

/// Read an unsigned varint off the front of `bytes`.
pub(crate) fn read_varint(bytes: &[u8]) -> Result<(u64, &[u8]), String> {
    decode::u64(bytes).map_err(|e| e.to_string())
}

/// A parsed content identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Cid {
    version: u64,
    codec: u64,
    multihash: Vec<u8>,
}

impl Cid {
    /// Build a CIDv1 around an existing multihash.
    pub(crate) fn v1(codec: u64, multihash: Vec<u8>) -> Self {
        Self {
            version: 1,
            codec,
            multihash,
        }
    }

    /// Build a CIDv1 whose multihash wraps `digest` under `code`.
    pub(crate) fn v1_with_digest(codec: u64, code: u64, digest: &[u8]) -> Self {
        let mut multihash = Vec::with_capacity(digest.len() + 4);
        push_varint(&mut multihash, code);
        push_varint(&mut multihash, digest.len() as u64);
        multihash.extend_from_slice(digest);
        Self::v1(codec, multihash)
    }

    /// Parse binary CID bytes, v0 or v1.
    pub(crate) fn from_bytes(bytes: &[u8]) -> Result<Self, String> {
        if bytes.len() == 34 && bytes[0] == 0x12 && bytes[1] == 0x20 {
            return Ok(Self {
                version: 0,
                codec: DAG_PB,
                multihash: bytes.to_vec(),
            });
        }
        let (version, rest) = read_varint(bytes)?;
        if version != 1 {
            return Err(format!("unsupported CID version {version}"));
        }
        let (codec, rest) = read_varint(rest)?;
        check_multihash(rest)?;
        Ok(Self::v1(codec, rest.to_vec()))
    }

    /// Parse a CID string: base58btc CIDv0 or any multibase CIDv1.
    pub(crate) fn parse(text: &str) -> Result<Self, String> {
        if text.len() == 46 && text.starts_with("Qm") {
            let multihash = Base::Base58Btc.decode(text).map_err(|e| e.to_string())?;
            return Self::from_bytes(&multihash);
        }
        let (_, bytes) = multibase::decode(text).map_err(|e| e.to_string())?;
        Self::from_bytes(&bytes)
    }

    /// Parse a bare base58btc multihash (a libp2p peer id) as a CIDv1.
    pub(crate) fn from_peer_id(text: &str, codec: u64) -> Result<Self, String> {
        let multihash = Base::Base58Btc.decode(text).map_err(|e| e.to_string())?;
        check_multihash(&multihash)?;
        Ok(Self::v1(codec, multihash))
    }

    pub(crate) const fn codec(&self) -> u64 {
        self.codec
    }

    /// Upgrade to CIDv1, keeping codec and multihash.
    pub(crate) fn into_v1(self) -> Self {
        Self::v1(self.codec, self.multihash)
    }

    /// Same multihash under another codec, as a CIDv1.
    pub(crate) fn with_codec(self, codec: u64) -> Self {
        Self::v1(codec, self.multihash)
    }

    /// Multihash code and digest.
    pub(crate) fn digest(&self) -> Result<(u64, &[u8]), String> {
        let (code, rest) = read_varint(&self.multihash)?;
        let (_, digest) = read_varint(rest)?;
        Ok((code, digest))
    }

    /// Binary form; CIDv0 is the bare multihash.
    pub(crate) fn to_bytes(&self) -> Vec<u8> {
        if self.version == 0 {
            return self.multihash.clone();
        }
        let mut out = Vec::with_capacity(self.multihash.len() + 4);
        push_varint(&mut out, self.version);
        push_varint(&mut out, self.codec);
        out.extend_from_slice(&self.multihash);
        out
    }

    /// String form in `base`; CIDv0 is always plain base58btc.
    pub(crate) fn to_string_of_base(&self, base: Base) -> String {
        if self.version == 0 {
            Base::Base58Btc.encode(&self.multihash)
        } else {
            multibase::encode(base, self.to_bytes())
        }
    }
}

/// Check that `bytes` is exactly one well-formed multihash.
fn check_multihash(bytes: &[u8]) -> Result<(), String> {
    let (code, rest) = read_varint(bytes)?;
    let (len, digest) = read_varint(rest)?;
    if digest.len() as u64 != len {
        return Err(format!(
            "multihash declares {len} digest bytes, found {}",
            digest.len()
        ));
    }
    if code == SHA2_256 && len != 32 {
        return Err(format!("sha2-256 digest must be 32 bytes, got {len}"));
    }
    Ok(())
}
