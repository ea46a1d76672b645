//! Labels and the Encoded Label escape.
//!
//! A label is either literal text or a 32-byte labelhash standing in for
//! text that is unknown or too long for the wire format. The textual escape
//! `[<64 lower-case hex>]` only exists at the string boundary:
//! [`Label::parse`] reads it and [`Label`]'s `Display` writes it.

use std::fmt;

use alloy::primitives::{B256, hex, keccak256};

use crate::error::NameError;
use crate::normalize::Normalize;

/// Maximum UTF-8 byte length of a label in a wire packet.
pub const MAX_LABEL_LEN: usize = 255;

/// Length of an Encoded Label: two brackets around 64 hex characters.
const ENCODED_LABEL_LEN: usize = 66;

/// One segment of a dotted name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Label {
    /// Literal label text, not yet normalized.
    Literal(String),
    /// A label known only by its keccak-256 hash.
    Hashed(B256),
}

impl Label {
    /// Parse a label string, decoding the Encoded Label escape.
    ///
    /// Any label wrapped in square brackets is treated as an Encoded Label
    /// and must hold exactly 64 hex characters.
    ///
    /// # Errors
    ///
    /// Returns [`NameError::InvalidEncodedLabel`] for a malformed escape.
    pub fn parse(label: &str) -> Result<Self, NameError> {
        if label.len() >= 2 && label.starts_with('[') && label.ends_with(']') {
            decode_encoded_label(label).map(Self::Hashed)
        } else {
            Ok(Self::Literal(label.to_owned()))
        }
    }

    /// Whether this label is a hash escape.
    #[must_use]
    pub const fn is_hashed(&self) -> bool {
        matches!(self, Self::Hashed(_))
    }

    /// The 32-byte labelhash.
    ///
    /// Literal labels are normalized first; hashed labels are returned as-is.
    ///
    /// # Errors
    ///
    /// Propagates the normalizer's error unchanged.
    pub fn hash(&self, normalizer: &dyn Normalize) -> Result<B256, NameError> {
        match self {
            Self::Literal(text) => {
                let normalized = normalizer.normalize(text)?;
                Ok(keccak256(normalized.as_bytes()))
            }
            Self::Hashed(hash) => Ok(*hash),
        }
    }

    /// The number of bytes this label occupies in a wire packet.
    #[must_use]
    pub fn wire_len(&self) -> usize {
        match self {
            Self::Literal(text) => text.len(),
            Self::Hashed(_) => ENCODED_LABEL_LEN,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => f.write_str(text),
            Self::Hashed(hash) => write!(f, "[{}]", hex::encode(hash)),
        }
    }
}

impl From<B256> for Label {
    fn from(hash: B256) -> Self {
        Self::Hashed(hash)
    }
}

/// Whether `label` is exactly an Encoded Label: `[`, 64 hex characters, `]`.
#[must_use]
pub fn is_encoded_label(label: &str) -> bool {
    label.len() == ENCODED_LABEL_LEN
        && label.starts_with('[')
        && label.ends_with(']')
        && label[1..ENCODED_LABEL_LEN - 1]
            .bytes()
            .all(|b| b.is_ascii_hexdigit())
}

/// Extract the labelhash from an Encoded Label.
///
/// Upper-case hex is accepted on read.
///
/// # Errors
///
/// Returns [`NameError::InvalidEncodedLabel`] unless the label is a bracket
/// pair around exactly 64 hex characters.
pub fn decode_encoded_label(label: &str) -> Result<B256, NameError> {
    let interior = label
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(|| {
            NameError::invalid_encoded_label(label, "expected surrounding square brackets")
        })?;
    if interior.len() != 64 || !interior.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(NameError::invalid_encoded_label(
            label,
            "expected exactly 64 hex characters",
        ));
    }
    let mut out = [0u8; 32];
    hex::decode_to_slice(interior, &mut out)
        .map_err(|_| NameError::invalid_encoded_label(label, "invalid hex"))?;
    Ok(B256::from(out))
}

/// Render a labelhash as its canonical Encoded Label (lower-case hex).
#[must_use]
pub fn encode_label_hash(hash: B256) -> String {
    Label::Hashed(hash).to_string()
}

/// Check that a label fits in one wire-format length byte.
///
/// Encoded Labels always pass: they stand for a hash, whatever the length
/// of the real label.
///
/// # Errors
///
/// Returns [`NameError::LabelTooLong`] when the label exceeds 255 bytes.
pub fn check_label_length(label: &str) -> Result<(), NameError> {
    if is_encoded_label(label) || label.len() <= MAX_LABEL_LEN {
        Ok(())
    } else {
        Err(NameError::LabelTooLong {
            label: label.to_owned(),
            len: label.len(),
        })
    }
}
