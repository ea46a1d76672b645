//! ENS namehash (EIP-137).
//!
//! A name is hashed from the root towards the leaf:
//!
//! ```text
//! node("")          = 0x00..00
//! node(label.rest)  = keccak256(node(rest) ++ labelhash(label))
//! ```
//!
//! Encoded Labels contribute their embedded hash directly, so a name hashes
//! the same whether a label is spelled out or escaped.

use alloy::primitives::{Address, B256, hex, keccak256};

use crate::error::NameError;
use crate::label::Label;
use crate::normalize::Normalize;

/// Special label that names the root when it is the whole name.
pub const ROOT_LABEL: &str = "[root]";

/// Suffix of reverse-resolution names.
pub const REVERSE_SUFFIX: &str = "addr.reverse";

/// Fold one labelhash into a parent node.
fn child_node(parent: B256, label_hash: B256) -> B256 {
    let mut buf = [0u8; 64];
    buf[..32].copy_from_slice(parent.as_slice());
    buf[32..].copy_from_slice(label_hash.as_slice());
    keccak256(buf)
}

/// Whether `name` denotes the root.
fn is_root(name: &str) -> bool {
    name.is_empty() || name == ROOT_LABEL
}

/// Parse one label of `name`, rejecting empty and misplaced root labels.
fn parse_label(name: &str, label: &str) -> Result<Label, NameError> {
    if label.is_empty() {
        return Err(NameError::NameWithEmptyLabels {
            name: name.to_owned(),
        });
    }
    if label == ROOT_LABEL {
        return Err(NameError::RootNameIncludesOtherLabels {
            name: name.to_owned(),
        });
    }
    Label::parse(label)
}

/// Compute the namehash of a dotted name.
///
/// `""` and `"[root]"` hash to 32 zero bytes.
///
/// # Errors
///
/// Returns an error for empty labels, malformed Encoded Labels, or when the
/// normalizer rejects a label (its error is passed through unchanged).
pub fn namehash(name: &str, normalizer: &dyn Normalize) -> Result<B256, NameError> {
    if is_root(name) {
        return Ok(B256::ZERO);
    }
    name.rsplit('.').try_fold(B256::ZERO, |node, label| {
        let label_hash = parse_label(name, label)?.hash(normalizer)?;
        Ok(child_node(node, label_hash))
    })
}

/// Compute the labelhash of a single label.
///
/// # Errors
///
/// Returns an error for a malformed Encoded Label or a normalizer failure.
pub fn labelhash(label: &str, normalizer: &dyn Normalize) -> Result<B256, NameError> {
    Label::parse(label)?.hash(normalizer)
}

/// Split a name into its labels, leaf first.
///
/// Root names produce no labels.
///
/// # Errors
///
/// Returns an error for empty labels, a misplaced `[root]`, or a malformed
/// Encoded Label.
pub fn split_name(name: &str) -> Result<Vec<Label>, NameError> {
    if is_root(name) {
        return Ok(Vec::new());
    }
    name.split('.').map(|label| parse_label(name, label)).collect()
}

/// Validate a name and return its normalized spelling.
///
/// Literal labels are normalized, Encoded Labels are rewritten in their
/// canonical lower-case form, and `[root]` is kept as-is.
///
/// # Errors
///
/// Same conditions as [`namehash`].
pub fn validate_name(name: &str, normalizer: &dyn Normalize) -> Result<String, NameError> {
    if name == ROOT_LABEL {
        return Ok(name.to_owned());
    }
    if name.is_empty() {
        return Ok(String::new());
    }
    let labels = split_name(name)?
        .into_iter()
        .map(|label| match label {
            Label::Literal(text) => normalizer.normalize(&text).map_err(NameError::from),
            hashed @ Label::Hashed(_) => Ok(hashed.to_string()),
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(labels.join("."))
}

/// The reverse-resolution name of an address: `<hex>.addr.reverse`.
#[must_use]
pub fn reverse_name(address: Address) -> String {
    format!("{}.{REVERSE_SUFFIX}", hex::encode(address.as_slice()))
}

/// The namehash of [`reverse_name`] for `address`.
#[must_use]
pub fn reverse_node(address: Address) -> B256 {
    let addr_label = hex::encode(address.as_slice());
    [addr_label.as_str(), "addr", "reverse"]
        .iter()
        .rev()
        .fold(B256::ZERO, |node, label| {
            child_node(node, keccak256(label.as_bytes()))
        })
}

#[cfg(test)]
mod tests {
    use alloy::primitives::{address, b256};

    use super::*;
    use crate::error::NormalizeError;
    use crate::label::encode_label_hash;
    use crate::normalize::BasicNormalizer;

    /// Rejects every label containing `x`.
    #[derive(Debug)]
    struct RejectX;

    impl Normalize for RejectX {
        fn normalize(&self, label: &str) -> Result<String, NormalizeError> {
            if label.contains('x') {
                Err(NormalizeError::new(label, "x is not allowed"))
            } else {
                Ok(label.to_owned())
            }
        }
    }

    fn hash(name: &str) -> B256 {
        namehash(name, &BasicNormalizer).unwrap()
    }

    mod golden {
        use super::*;

        #[test]
        fn root_is_zero() {
            assert_eq!(hash(""), B256::ZERO);
            assert_eq!(hash(ROOT_LABEL), B256::ZERO);
        }

        #[test]
        fn eth() {
            assert_eq!(
                hash("eth"),
                b256!("93cdeb708b7545dc668eb9280176169d1c33cfd8ed6f04690a0bcc88a93fc4ae")
            );
        }

        #[test]
        fn foo_eth() {
            assert_eq!(
                hash("foo.eth"),
                b256!("de9b09fd7c5f901e23a3f19fecc54828e9c848539801e86591bd9801b019f84f")
            );
        }

        #[test]
        fn test_eth() {
            assert_eq!(
                hash("test.eth"),
                b256!("eb4f647bea6caa36333c816d7b46fdcb05f9466ecacc140ea8c66faf15b3d9f1")
            );
        }

        #[test]
        fn normalizes_before_hashing() {
            assert_eq!(hash("TEST.Eth"), hash("test.eth"));
        }
    }

    mod encoded_labels {
        use super::*;

        #[test]
        fn leaf_substitution_is_invisible() {
            let test_hash = keccak256("test");
            let name = format!("{}.eth", encode_label_hash(test_hash));
            assert_eq!(hash(&name), hash("test.eth"));
        }

        #[test]
        fn every_position_substitutes() {
            let literal = hash("sub.domain.eth");
            let labels = ["sub", "domain", "eth"];
            for i in 0..labels.len() {
                let mut parts: Vec<String> = labels.iter().map(|l| (*l).to_owned()).collect();
                parts[i] = encode_label_hash(keccak256(labels[i]));
                assert_eq!(hash(&parts.join(".")), literal, "position {i}");
            }
        }

        #[test]
        fn encoded_labels_skip_normalizer() {
            let name = format!("{}.eth", encode_label_hash(keccak256("x")));
            assert!(namehash(&name, &RejectX).is_ok());
        }

        #[test]
        fn malformed_escape_fails() {
            let err = namehash("[1234].eth", &BasicNormalizer).unwrap_err();
            assert!(matches!(err, NameError::InvalidEncodedLabel { .. }));
        }
    }

    mod errors {
        use super::*;

        #[test]
        fn empty_labels() {
            for name in ["a..eth", ".eth", "eth.", "."] {
                let err = namehash(name, &BasicNormalizer).unwrap_err();
                assert_eq!(
                    err,
                    NameError::NameWithEmptyLabels {
                        name: name.to_owned()
                    },
                    "{name}"
                );
            }
        }

        #[test]
        fn root_label_alongside_others() {
            let err = namehash("[root].eth", &BasicNormalizer).unwrap_err();
            assert!(matches!(err, NameError::RootNameIncludesOtherLabels { .. }));
        }

        #[test]
        fn normalizer_error_propagates_unchanged() {
            let err = namehash("xyz.eth", &RejectX).unwrap_err();
            assert_eq!(
                err,
                NameError::Normalize(NormalizeError::new("xyz", "x is not allowed"))
            );
        }
    }

    mod validate {
        use super::*;

        #[test]
        fn normalizes_labels() {
            assert_eq!(
                validate_name("Nick.ETH", &BasicNormalizer).unwrap(),
                "nick.eth"
            );
        }

        #[test]
        fn canonicalizes_encoded_labels() {
            let encoded = encode_label_hash(keccak256("nick"));
            let upper = format!("{}.eth", encoded.to_uppercase());
            assert_eq!(
                validate_name(&upper, &BasicNormalizer).unwrap(),
                format!("{encoded}.eth")
            );
        }

        #[test]
        fn keeps_root() {
            assert_eq!(validate_name("[root]", &BasicNormalizer).unwrap(), "[root]");
            assert_eq!(validate_name("", &BasicNormalizer).unwrap(), "");
        }
    }

    #[test]
    fn labelhash_of_eth() {
        assert_eq!(
            labelhash("eth", &BasicNormalizer).unwrap(),
            b256!("4f5b812789fc606be1b3b16908db13fc7a9adf7ca72641f84d75b47069d3d7f0")
        );
    }

    #[test]
    fn split_is_leaf_first() {
        let labels = split_name("a.b.eth").unwrap();
        let rendered: Vec<String> = labels.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, ["a", "b", "eth"]);
        assert!(split_name("").unwrap().is_empty());
    }

    #[test]
    fn reverse_name_and_node_agree() {
        let addr = address!("b8c2C29ee19D8307cb7255e1Cd9CbDE883A267d5");
        let name = reverse_name(addr);
        assert_eq!(name, "b8c2c29ee19d8307cb7255e1cd9cbde883a267d5.addr.reverse");
        assert_eq!(reverse_node(addr), hash(&name));
    }
}
