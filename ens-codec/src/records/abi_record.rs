//! ABI metadata records (ENSIP-4).
//!
//! A resolver stores one blob per content type and the reader asks for a
//! bitmask of acceptable types. The resolver answers with the lowest
//! matching type it has.

use std::fmt;

use alloy::primitives::Bytes;
use serde_json::Value;

use crate::error::{DecodeError, RecordError};

/// One ABI encoding, identified by a single bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AbiContentType {
    /// Plain JSON.
    Json,
    /// zlib-compressed JSON.
    ZlibJson,
    /// CBOR.
    Cbor,
    /// A URI pointing at the ABI.
    Uri,
}

impl AbiContentType {
    /// All content types, lowest bit first.
    pub const ALL: [Self; 4] = [Self::Json, Self::ZlibJson, Self::Cbor, Self::Uri];

    /// The content type bit.
    #[must_use]
    pub const fn bit(self) -> u64 {
        match self {
            Self::Json => 1,
            Self::ZlibJson => 2,
            Self::Cbor => 4,
            Self::Uri => 8,
        }
    }

    /// Content type for a single bit.
    #[must_use]
    pub fn from_bit(bit: u64) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.bit() == bit)
    }
}

impl fmt::Display for AbiContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Json => "json",
            Self::ZlibJson => "zlib",
            Self::Cbor => "cbor",
            Self::Uri => "uri",
        })
    }
}

/// A bitmask of acceptable [`AbiContentType`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AbiContentTypes(u64);

impl Default for AbiContentTypes {
    fn default() -> Self {
        Self::ALL
    }
}

impl AbiContentTypes {
    /// Every content type.
    pub const ALL: Self = Self(0x0f);

    /// No content type.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Add a content type.
    #[must_use]
    pub const fn with(self, content_type: AbiContentType) -> Self {
        Self(self.0 | content_type.bit())
    }

    /// Whether the mask includes `content_type`.
    #[must_use]
    pub const fn contains(self, content_type: AbiContentType) -> bool {
        self.0 & content_type.bit() != 0
    }

    /// The raw bitmask.
    #[must_use]
    pub const fn bits(self) -> u64 {
        self.0
    }
}

impl From<AbiContentType> for AbiContentTypes {
    fn from(content_type: AbiContentType) -> Self {
        Self::empty().with(content_type)
    }
}

impl FromIterator<AbiContentType> for AbiContentTypes {
    fn from_iter<I: IntoIterator<Item = AbiContentType>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), Self::with)
    }
}

/// The body of an ABI record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbiPayload {
    /// Parsed JSON ABI.
    Json(Value),
    /// URI of the ABI.
    Uri(String),
    /// Compressed or binary payload, passed through untouched.
    Raw(Bytes),
}

/// A decoded ABI record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbiRecord {
    /// The content type the resolver answered with.
    pub content_type: AbiContentType,
    /// The record body.
    pub payload: AbiPayload,
}

impl AbiRecord {
    /// A JSON ABI record.
    #[must_use]
    pub const fn json(value: Value) -> Self {
        Self {
            content_type: AbiContentType::Json,
            payload: AbiPayload::Json(value),
        }
    }

    /// A URI ABI record.
    #[must_use]
    pub fn uri(uri: impl Into<String>) -> Self {
        Self {
            content_type: AbiContentType::Uri,
            payload: AbiPayload::Uri(uri.into()),
        }
    }

    /// Serialize the body for `setABI`.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::InvalidAbi`] if the JSON cannot be serialized
    /// or the payload does not match its content type.
    pub fn to_bytes(&self) -> Result<Bytes, RecordError> {
        match (&self.payload, self.content_type) {
            (AbiPayload::Json(value), AbiContentType::Json) => serde_json::to_vec(value)
                .map(Bytes::from)
                .map_err(|e| RecordError::InvalidAbi(e.to_string())),
            (AbiPayload::Uri(uri), AbiContentType::Uri) => Ok(Bytes::from(uri.clone().into_bytes())),
            (AbiPayload::Raw(raw), AbiContentType::ZlibJson | AbiContentType::Cbor) => {
                Ok(raw.clone())
            }
            (_, content_type) => Err(RecordError::InvalidAbi(format!(
                "payload does not match content type {content_type}"
            ))),
        }
    }

    /// Interpret resolver output for a request with mask `requested`.
    ///
    /// Returns `None` when there is no record, or when the resolver answered
    /// with a type outside `requested`.
    pub(crate) fn from_resolver(
        requested: AbiContentTypes,
        content_type: u64,
        data: &[u8],
    ) -> Result<Option<Self>, DecodeError> {
        let Some(content_type) = AbiContentType::from_bit(content_type) else {
            return Ok(None);
        };
        if data.is_empty() || !requested.contains(content_type) {
            return Ok(None);
        }
        let payload = match content_type {
            AbiContentType::Json => AbiPayload::Json(serde_json::from_slice(data)?),
            AbiContentType::Uri => AbiPayload::Uri(
                String::from_utf8(data.to_vec()).map_err(|_| DecodeError::InvalidUri)?,
            ),
            AbiContentType::ZlibJson | AbiContentType::Cbor => {
                AbiPayload::Raw(Bytes::copy_from_slice(data))
            }
        };
        Ok(Some(Self {
            content_type,
            payload,
        }))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn mask_building() {
        let mask: AbiContentTypes = [AbiContentType::Json, AbiContentType::Uri]
            .into_iter()
            .collect();
        assert_eq!(mask.bits(), 9);
        assert!(mask.contains(AbiContentType::Uri));
        assert!(!mask.contains(AbiContentType::Cbor));
        assert_eq!(AbiContentTypes::default().bits(), 0x0f);
    }

    #[test]
    fn from_bit_rejects_combined_bits() {
        assert_eq!(AbiContentType::from_bit(4), Some(AbiContentType::Cbor));
        assert_eq!(AbiContentType::from_bit(3), None);
        assert_eq!(AbiContentType::from_bit(0), None);
    }

    #[test]
    fn decodes_json() {
        let record = AbiRecord::from_resolver(AbiContentTypes::ALL, 1, br#"[{"type":"function"}]"#)
            .unwrap()
            .unwrap();
        assert_eq!(record, AbiRecord::json(json!([{"type": "function"}])));
    }

    #[test]
    fn unrequested_type_is_none() {
        let record =
            AbiRecord::from_resolver(AbiContentType::Json.into(), 8, b"ipfs://abi").unwrap();
        assert_eq!(record, None);
    }

    #[test]
    fn empty_is_none() {
        assert_eq!(AbiRecord::from_resolver(AbiContentTypes::ALL, 0, &[]).unwrap(), None);
        assert_eq!(AbiRecord::from_resolver(AbiContentTypes::ALL, 1, &[]).unwrap(), None);
    }

    #[test]
    fn bad_json_is_an_error() {
        let err = AbiRecord::from_resolver(AbiContentTypes::ALL, 1, b"{nope").unwrap_err();
        assert!(matches!(err, DecodeError::Json(_)));
    }

    #[test]
    fn raw_types_pass_through() {
        let record = AbiRecord::from_resolver(AbiContentTypes::ALL, 2, &[0x78, 0x9c])
            .unwrap()
            .unwrap();
        assert_eq!(record.payload, AbiPayload::Raw(Bytes::from_static(&[0x78, 0x9c])));
    }

    #[test]
    fn to_bytes_checks_pairing() {
        assert_eq!(
            AbiRecord::uri("ipfs://abi").to_bytes().unwrap(),
            Bytes::from_static(b"ipfs://abi")
        );
        let mismatched = AbiRecord {
            content_type: AbiContentType::Json,
            payload: AbiPayload::Uri("x".into()),
        };
        assert!(mismatched.to_bytes().is_err());
    }
}
