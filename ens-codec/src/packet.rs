//! DNS wire encoding of names.
//!
//! A packet is a run of `(length, bytes)` labels, leaf first, closed by a
//! zero length byte:
//!
//! ```text
//! "test.eth"  →  04 't' 'e' 's' 't' 03 'e' 't' 'h' 00
//! ```
//!
//! Labels keep their literal spelling on the wire, including the bracket
//! form of Encoded Labels.

use alloy::primitives::keccak256;
use serde::{Deserialize, Serialize};

use crate::error::{NameError, PacketError};
use crate::label::{Label, check_label_length, encode_label_hash};
use crate::namehash::ROOT_LABEL;

/// What to do with a label longer than
/// [`MAX_LABEL_LEN`](crate::label::MAX_LABEL_LEN) bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LongLabels {
    /// Fail with [`NameError::LabelTooLong`].
    #[default]
    Reject,
    /// Replace the label with the Encoded Label of its keccak-256 hash.
    Escape,
}

/// Encode a name as a DNS wire packet, rejecting oversized labels.
///
/// # Errors
///
/// Returns an error for empty labels, malformed Encoded Labels or labels
/// over 255 bytes.
pub fn packet_to_bytes(name: &str) -> Result<Vec<u8>, PacketError> {
    packet_to_bytes_with(name, LongLabels::Reject)
}

/// Encode a name as a DNS wire packet.
///
/// One leading and one trailing dot are ignored. `""`, `"."` and `"[root]"`
/// encode as the bare root terminator. Encoded Labels are validated and
/// written with their literal spelling.
///
/// # Errors
///
/// Returns an error for empty labels, a malformed Encoded Label, `[root]`
/// alongside other labels, or oversized labels when `long_labels` is
/// [`LongLabels::Reject`].
pub fn packet_to_bytes_with(name: &str, long_labels: LongLabels) -> Result<Vec<u8>, PacketError> {
    if matches!(name, "" | "." | ROOT_LABEL) {
        return Ok(vec![0]);
    }
    let trimmed = name.strip_prefix('.').unwrap_or(name);
    let trimmed = trimmed.strip_suffix('.').unwrap_or(trimmed);

    let labels = trimmed
        .split('.')
        .map(|text| parse_label(name, text).map(|label| (text, label)))
        .collect::<Result<Vec<_>, _>>()?;

    let capacity = labels.iter().map(|(_, label)| label.wire_len() + 1).sum::<usize>() + 1;
    let mut out = Vec::with_capacity(capacity);
    for (text, _) in &labels {
        let escaped;
        let bytes = match (check_label_length(text), long_labels) {
            (Ok(()), _) => text.as_bytes(),
            (Err(_), LongLabels::Escape) => {
                escaped = encode_label_hash(keccak256(text.as_bytes()));
                escaped.as_bytes()
            }
            (Err(e), LongLabels::Reject) => return Err(e.into()),
        };
        let len = u8::try_from(bytes.len()).map_err(|_| NameError::LabelTooLong {
            label: (*text).to_owned(),
            len: bytes.len(),
        })?;
        out.push(len);
        out.extend_from_slice(bytes);
    }
    out.push(0);
    Ok(out)
}

/// Validate one label of `name` for the wire.
fn parse_label(name: &str, text: &str) -> Result<Label, NameError> {
    if text.is_empty() {
        return Err(NameError::NameWithEmptyLabels {
            name: name.to_owned(),
        });
    }
    if text == ROOT_LABEL {
        return Err(NameError::RootNameIncludesOtherLabels {
            name: name.to_owned(),
        });
    }
    Label::parse(text)
}

/// Split one label off the front of `packet`.
///
/// Returns `None` for the root terminator.
fn split_label(packet: &[u8], offset: usize) -> Result<Option<(&str, usize)>, PacketError> {
    let Some(&head) = packet.get(offset) else {
        return Err(PacketError::MissingTerminator);
    };
    if head == 0 {
        return Ok(None);
    }
    let start = offset + 1;
    let end = start + usize::from(head);
    let raw = packet
        .get(start..end)
        .ok_or(PacketError::ShortInput { offset })?;
    let label = std::str::from_utf8(raw).map_err(|_| PacketError::InvalidUtf8 { offset })?;
    Ok(Some((label, end)))
}

/// Whether `label` repeats the tail of the dotted label before it, as in
/// `08 "8436.eth" 03 "eth" 00`.
fn repeats_suffix(previous: &str, label: &str) -> bool {
    previous
        .rsplit_once('.')
        .is_some_and(|(_, tail)| tail == label)
}

/// Decode a DNS wire packet into a dotted name.
///
/// Some producers emit the final label twice, once glued to the previous
/// label with a dot and once on its own. When the last label before the
/// terminator equals the part after the last dot of the label preceding
/// it, it is dropped. No other labels are ever skipped.
///
/// # Errors
///
/// Returns an error for truncated labels, a missing terminator, bytes after
/// the terminator, or labels that are not UTF-8.
pub fn bytes_to_packet(packet: &[u8]) -> Result<String, PacketError> {
    let mut labels: Vec<&str> = Vec::new();
    let mut offset = 0;
    while let Some((label, next)) = split_label(packet, offset)? {
        labels.push(label);
        offset = next;
    }
    let terminator = offset;
    if terminator + 1 != packet.len() {
        return Err(PacketError::TrailingBytes {
            count: packet.len() - terminator - 1,
        });
    }

    if let [.., previous, last] = labels.as_slice() {
        if repeats_suffix(previous, last) {
            labels.pop();
        }
    }
    Ok(labels.join("."))
}
