//! Resolver record calls.
//!
//! A [`RecordCall`] is one resolver operation keyed by a namehash. It knows
//! how to encode its calldata and how to decode what the resolver returns:
//!
//! ```text
//! RecordCall::text(node, "url")
//!   → calldata()                       text(bytes32,string) selector + args
//!   → decode(return bytes, mode)       Some(RecordValue::Text(..)) | None
//! ```
//!
//! Decoding takes an explicit [`DecodeMode`]: lenient callers get `None`
//! for malformed data, strict callers get the original [`DecodeError`].

mod abi;
mod abi_record;

use alloy::primitives::{Address, B256, Bytes, U256};
use alloy::sol_types::SolCall;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use abi_record::{AbiContentType, AbiContentTypes, AbiPayload, AbiRecord};

pub(crate) use abi::{multicall3, resolver};
use abi::{legacy, multicoin};

use crate::coin::{DecodedAddress, ETH_COIN_TYPE};
use crate::config::Registries;
use crate::contenthash::DecodedContentHash;
use crate::error::{DecodeError, RecordError};

/// How decode failures on untrusted return data are reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecodeMode {
    /// Malformed data decodes to `None`.
    #[default]
    Lenient,
    /// Malformed data is an error, passed through unchanged.
    Strict,
}

impl DecodeMode {
    /// Apply this policy to a decode result.
    ///
    /// # Errors
    ///
    /// In [`DecodeMode::Strict`], returns the error from `result` as-is.
    pub fn apply<T>(self, result: Result<Option<T>, DecodeError>) -> Result<Option<T>, DecodeError> {
        match (self, result) {
            (Self::Lenient, Err(error)) => {
                debug!(%error, "lenient decode dropped malformed return data");
                Ok(None)
            }
            (_, result) => result,
        }
    }

    /// Whether errors propagate.
    #[must_use]
    pub const fn is_strict(self) -> bool {
        matches!(self, Self::Strict)
    }
}

/// Which `addr` function shape to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddrShape {
    /// `addr(bytes32) returns (address)`, ETH only.
    Legacy,
    /// `addr(bytes32,uint256) returns (bytes)`.
    MultiCoin,
}

impl AddrShape {
    /// The shape readers use for `coin_type`: legacy for ETH, multi-coin
    /// otherwise.
    #[must_use]
    pub const fn for_coin(coin_type: u64) -> Self {
        if coin_type == ETH_COIN_TYPE {
            Self::Legacy
        } else {
            Self::MultiCoin
        }
    }
}

/// A decoded record value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValue {
    /// A text record.
    Text(String),
    /// An address record.
    Address(DecodedAddress),
    /// A content hash record.
    ContentHash(DecodedContentHash),
    /// An ABI record.
    Abi(AbiRecord),
}

impl RecordValue {
    /// The text value, if this is a text record.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The address, if this is an address record.
    #[must_use]
    pub const fn as_address(&self) -> Option<&DecodedAddress> {
        match self {
            Self::Address(address) => Some(address),
            _ => None,
        }
    }

    /// The content hash, if this is a content hash record.
    #[must_use]
    pub const fn as_content_hash(&self) -> Option<&DecodedContentHash> {
        match self {
            Self::ContentHash(hash) => Some(hash),
            _ => None,
        }
    }

    /// The ABI record, if this is one.
    #[must_use]
    pub const fn as_abi(&self) -> Option<&AbiRecord> {
        match self {
            Self::Abi(abi) => Some(abi),
            _ => None,
        }
    }
}

/// One resolver operation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RecordCall {
    /// Read a text record.
    Text {
        /// Namehash.
        node: B256,
        /// Record key, e.g. `url` or `com.twitter`.
        key: String,
    },
    /// Write a text record; `None` deletes it.
    SetText {
        /// Namehash.
        node: B256,
        /// Record key.
        key: String,
        /// New value.
        value: Option<String>,
    },
    /// Read an address record.
    Addr {
        /// Namehash.
        node: B256,
        /// SLIP-44 / ENSIP-11 coin type.
        coin_type: u64,
        /// Function shape.
        shape: AddrShape,
    },
    /// Write an address record through the multi-coin function.
    SetAddr {
        /// Namehash.
        node: B256,
        /// SLIP-44 / ENSIP-11 coin type.
        coin_type: u64,
        /// Raw address bytes; empty deletes the record.
        address: Bytes,
    },
    /// Write the ETH address through the legacy function; the zero address
    /// deletes it.
    SetEthAddr {
        /// Namehash.
        node: B256,
        /// The new address.
        address: Address,
    },
    /// Read the content hash.
    ContentHash {
        /// Namehash.
        node: B256,
    },
    /// Write the content hash; empty bytes delete it.
    SetContentHash {
        /// Namehash.
        node: B256,
        /// Encoded content hash.
        hash: Bytes,
    },
    /// Read an ABI record.
    Abi {
        /// Namehash.
        node: B256,
        /// Acceptable content types.
        content_types: AbiContentTypes,
    },
    /// Write an ABI record; empty data deletes it.
    SetAbi {
        /// Namehash.
        node: B256,
        /// Content type of `data`.
        content_type: AbiContentType,
        /// Serialized ABI.
        data: Bytes,
    },
    /// Delete every record of the node.
    ClearRecords {
        /// Namehash.
        node: B256,
    },
}

impl RecordCall {
    /// Read a text record.
    #[must_use]
    pub fn text(node: B256, key: impl Into<String>) -> Self {
        Self::Text {
            node,
            key: key.into(),
        }
    }

    /// Write a text record; `None` or `""` deletes it.
    #[must_use]
    pub fn set_text(node: B256, key: impl Into<String>, value: Option<&str>) -> Self {
        Self::SetText {
            node,
            key: key.into(),
            value: value.filter(|v| !v.is_empty()).map(str::to_owned),
        }
    }

    /// Read an address record with the default shape for `coin_type`.
    #[must_use]
    pub const fn addr(node: B256, coin_type: u64) -> Self {
        Self::Addr {
            node,
            coin_type,
            shape: AddrShape::for_coin(coin_type),
        }
    }

    /// Read an address record with an explicit shape.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::InvalidAddress`] when asking for the legacy
    /// shape with a coin other than ETH.
    pub fn addr_with_shape(node: B256, coin_type: u64, shape: AddrShape) -> Result<Self, RecordError> {
        check_shape(coin_type, shape)?;
        Ok(Self::Addr {
            node,
            coin_type,
            shape,
        })
    }

    /// Write an address record through the multi-coin function.
    #[must_use]
    pub fn set_addr(node: B256, coin_type: u64, address: impl Into<Bytes>) -> Self {
        Self::SetAddr {
            node,
            coin_type,
            address: address.into(),
        }
    }

    /// Write the ETH address through the legacy function.
    #[must_use]
    pub const fn set_addr_legacy(node: B256, address: Address) -> Self {
        Self::SetEthAddr { node, address }
    }

    /// Write an address record with an explicit shape.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::InvalidAddress`] when asking for the legacy
    /// shape with a coin other than ETH, or with bytes that are not a
    /// 20-byte address.
    pub fn set_addr_with_shape(
        node: B256,
        coin_type: u64,
        shape: AddrShape,
        address: &[u8],
    ) -> Result<Self, RecordError> {
        check_shape(coin_type, shape)?;
        match shape {
            AddrShape::Legacy => {
                let address = Address::try_from(address).map_err(|_| {
                    RecordError::invalid_address(
                        coin_type,
                        format!("legacy setAddr takes 20 bytes, got {}", address.len()),
                    )
                })?;
                Ok(Self::set_addr_legacy(node, address))
            }
            AddrShape::MultiCoin => Ok(Self::set_addr(node, coin_type, address.to_vec())),
        }
    }

    /// Read the content hash.
    #[must_use]
    pub const fn content_hash(node: B256) -> Self {
        Self::ContentHash { node }
    }

    /// Write an already-encoded content hash.
    #[must_use]
    pub fn set_content_hash(node: B256, hash: impl Into<Bytes>) -> Self {
        Self::SetContentHash {
            node,
            hash: hash.into(),
        }
    }

    /// Read an ABI record.
    #[must_use]
    pub const fn abi(node: B256, content_types: AbiContentTypes) -> Self {
        Self::Abi {
            node,
            content_types,
        }
    }

    /// Write an ABI record.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::InvalidAbi`] if the record cannot be serialized.
    pub fn set_abi(node: B256, record: &AbiRecord) -> Result<Self, RecordError> {
        Ok(Self::SetAbi {
            node,
            content_type: record.content_type,
            data: record.to_bytes()?,
        })
    }

    /// Delete every record of the node.
    #[must_use]
    pub const fn clear_records(node: B256) -> Self {
        Self::ClearRecords { node }
    }

    /// The namehash this call targets.
    #[must_use]
    pub const fn node(&self) -> B256 {
        match self {
            Self::Text { node, .. }
            | Self::SetText { node, .. }
            | Self::Addr { node, .. }
            | Self::SetAddr { node, .. }
            | Self::SetEthAddr { node, .. }
            | Self::ContentHash { node }
            | Self::SetContentHash { node, .. }
            | Self::Abi { node, .. }
            | Self::SetAbi { node, .. }
            | Self::ClearRecords { node } => *node,
        }
    }

    /// Whether the call writes state.
    #[must_use]
    pub const fn is_write(&self) -> bool {
        matches!(
            self,
            Self::SetText { .. }
                | Self::SetAddr { .. }
                | Self::SetEthAddr { .. }
                | Self::SetContentHash { .. }
                | Self::SetAbi { .. }
                | Self::ClearRecords { .. }
        )
    }

    /// The Solidity signature, e.g. `text(bytes32,string)`.
    #[must_use]
    pub const fn signature(&self) -> &'static str {
        match self {
            Self::Text { .. } => resolver::textCall::SIGNATURE,
            Self::SetText { .. } => resolver::setTextCall::SIGNATURE,
            Self::Addr {
                shape: AddrShape::Legacy,
                ..
            } => legacy::addrCall::SIGNATURE,
            Self::Addr {
                shape: AddrShape::MultiCoin,
                ..
            } => multicoin::addrCall::SIGNATURE,
            Self::SetEthAddr { .. } => legacy::setAddrCall::SIGNATURE,
            Self::SetAddr { .. } => multicoin::setAddrCall::SIGNATURE,
            Self::ContentHash { .. } => resolver::contenthashCall::SIGNATURE,
            Self::SetContentHash { .. } => resolver::setContenthashCall::SIGNATURE,
            Self::Abi { .. } => resolver::ABICall::SIGNATURE,
            Self::SetAbi { .. } => resolver::setABICall::SIGNATURE,
            Self::ClearRecords { .. } => resolver::clearRecordsCall::SIGNATURE,
        }
    }

    /// The bare function name, e.g. `text`.
    #[must_use]
    pub fn function_name(&self) -> &'static str {
        let signature = self.signature();
        signature
            .split_once('(')
            .map_or(signature, |(name, _)| name)
    }

    /// ABI-encoded calldata, selector included.
    #[must_use]
    pub fn calldata(&self) -> Bytes {
        let encoded = match self {
            Self::Text { node, key } => resolver::textCall {
                node: *node,
                key: key.clone(),
            }
            .abi_encode(),
            Self::SetText { node, key, value } => resolver::setTextCall {
                node: *node,
                key: key.clone(),
                value: value.clone().unwrap_or_default(),
            }
            .abi_encode(),
            Self::Addr {
                node,
                shape: AddrShape::Legacy,
                ..
            } => legacy::addrCall { node: *node }.abi_encode(),
            Self::Addr {
                node,
                coin_type,
                shape: AddrShape::MultiCoin,
            } => multicoin::addrCall {
                node: *node,
                coinType: U256::from(*coin_type),
            }
            .abi_encode(),
            Self::SetEthAddr { node, address } => legacy::setAddrCall {
                node: *node,
                a: *address,
            }
            .abi_encode(),
            Self::SetAddr {
                node,
                coin_type,
                address,
            } => multicoin::setAddrCall {
                node: *node,
                coinType: U256::from(*coin_type),
                a: address.clone(),
            }
            .abi_encode(),
            Self::ContentHash { node } => resolver::contenthashCall { node: *node }.abi_encode(),
            Self::SetContentHash { node, hash } => resolver::setContenthashCall {
                node: *node,
                hash: hash.clone(),
            }
            .abi_encode(),
            Self::Abi {
                node,
                content_types,
            } => resolver::ABICall {
                node: *node,
                contentTypes: U256::from(content_types.bits()),
            }
            .abi_encode(),
            Self::SetAbi {
                node,
                content_type,
                data,
            } => resolver::setABICall {
                node: *node,
                contentType: U256::from(content_type.bit()),
                data: data.clone(),
            }
            .abi_encode(),
            Self::ClearRecords { node } => resolver::clearRecordsCall { node: *node }.abi_encode(),
        };
        Bytes::from(encoded)
    }

    /// Decode return data under `mode`.
    ///
    /// Write calls have no return value and always decode to `None`.
    ///
    /// # Errors
    ///
    /// In [`DecodeMode::Strict`], returns the error from
    /// [`RecordCall::try_decode`] unchanged.
    pub fn decode(
        &self,
        data: &[u8],
        registries: &Registries,
        mode: DecodeMode,
    ) -> Result<Option<RecordValue>, DecodeError> {
        mode.apply(self.try_decode(data, registries))
    }

    /// Decode return data, reporting every failure.
    ///
    /// `Ok(None)` means the resolver has no such record.
    ///
    /// # Errors
    ///
    /// Returns the ABI or payload error for malformed data.
    pub fn try_decode(
        &self,
        data: &[u8],
        registries: &Registries,
    ) -> Result<Option<RecordValue>, DecodeError> {
        match self {
            Self::Text { .. } => {
                let text = resolver::textCall::abi_decode_returns(data)?;
                Ok((!text.is_empty()).then_some(RecordValue::Text(text)))
            }
            Self::Addr {
                coin_type,
                shape: AddrShape::Legacy,
                ..
            } => {
                let address = legacy::addrCall::abi_decode_returns(data)?;
                Ok((!address.is_zero())
                    .then(|| RecordValue::Address(registries.coins.decode(*coin_type, address.as_slice()))))
            }
            Self::Addr {
                coin_type,
                shape: AddrShape::MultiCoin,
                ..
            } => {
                let raw = multicoin::addrCall::abi_decode_returns(data)?;
                if raw.iter().all(|b| *b == 0) {
                    return Ok(None);
                }
                Ok(Some(RecordValue::Address(
                    registries.coins.decode(*coin_type, &raw),
                )))
            }
            Self::ContentHash { .. } => {
                let raw = resolver::contenthashCall::abi_decode_returns(data)?;
                Ok(registries
                    .content_hash
                    .decode(&raw)?
                    .map(RecordValue::ContentHash))
            }
            Self::Abi { content_types, .. } => {
                let ret = resolver::ABICall::abi_decode_returns(data)?;
                let Ok(content_type) = u64::try_from(ret.contentType) else {
                    return Ok(None);
                };
                Ok(AbiRecord::from_resolver(*content_types, content_type, &ret.data)?
                    .map(RecordValue::Abi))
            }
            Self::SetText { .. }
            | Self::SetAddr { .. }
            | Self::SetEthAddr { .. }
            | Self::SetContentHash { .. }
            | Self::SetAbi { .. }
            | Self::ClearRecords { .. } => Ok(None),
        }
    }
}

fn check_shape(coin_type: u64, shape: AddrShape) -> Result<(), RecordError> {
    if shape == AddrShape::Legacy && coin_type != ETH_COIN_TYPE {
        return Err(RecordError::invalid_address(
            coin_type,
            "the legacy addr function only serves ETH",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use alloy::primitives::{address, keccak256};
    use alloy::sol_types::SolValue;
    use serde_json::json;

    use super::*;
    use crate::coin::EVM_BIT;
    use crate::contenthash::{Protocol, encode_content_hash};

    fn node() -> B256 {
        keccak256("node")
    }

    fn registries() -> Registries {
        Registries::default()
    }

    mod text {
        use super::*;

        #[test]
        fn calldata_round_trips() {
            let call = RecordCall::text(node(), "url");
            let data = call.calldata();
            assert_eq!(&data[..4], resolver::textCall::SELECTOR.as_slice());
            let decoded = resolver::textCall::abi_decode(&data).unwrap();
            assert_eq!(decoded.node, node());
            assert_eq!(decoded.key, "url");
            assert_eq!(call.function_name(), "text");
            assert_eq!(call.signature(), "text(bytes32,string)");
        }

        #[test]
        fn decodes_value() {
            let call = RecordCall::text(node(), "foo");
            let value = call
                .decode(&"bar".to_owned().abi_encode(), &registries(), DecodeMode::Strict)
                .unwrap();
            assert_eq!(value, Some(RecordValue::Text("bar".into())));
        }

        #[test]
        fn empty_string_is_none() {
            let call = RecordCall::text(node(), "foo");
            let value = call
                .decode(&String::new().abi_encode(), &registries(), DecodeMode::Strict)
                .unwrap();
            assert_eq!(value, None);
        }

        #[test]
        fn set_text_none_writes_empty_string() {
            let call = RecordCall::set_text(node(), "url", None);
            let decoded = resolver::setTextCall::abi_decode(&call.calldata()).unwrap();
            assert_eq!(decoded.value, "");
            assert_eq!(call, RecordCall::set_text(node(), "url", Some("")));
            assert!(call.is_write());
        }

        #[test]
        fn malformed_data() {
            let call = RecordCall::text(node(), "foo");
            assert_eq!(
                call.decode(&[0xde, 0xad], &registries(), DecodeMode::Lenient)
                    .unwrap(),
                None
            );
            let strict = call
                .decode(&[0xde, 0xad], &registries(), DecodeMode::Strict)
                .unwrap_err();
            let direct = resolver::textCall::abi_decode_returns(&[0xde, 0xad]).unwrap_err();
            assert!(matches!(strict, DecodeError::Abi(_)));
            assert_eq!(strict.to_string(), direct.to_string());
        }
    }

    mod addr {
        use super::*;

        const ADDR: Address = address!("b8c2C29ee19D8307cb7255e1Cd9CbDE883A267d5");

        #[test]
        fn eth_uses_legacy_shape() {
            let call = RecordCall::addr(node(), 60);
            assert_eq!(call.signature(), "addr(bytes32)");
            let value = call
                .decode(&ADDR.abi_encode(), &registries(), DecodeMode::Strict)
                .unwrap()
                .unwrap();
            assert_eq!(
                value.as_address().unwrap().value,
                "0xb8c2C29ee19D8307cb7255e1Cd9CbDE883A267d5"
            );
        }

        #[test]
        fn legacy_zero_address_is_none() {
            let call = RecordCall::addr(node(), 60);
            let value = call
                .decode(&Address::ZERO.abi_encode(), &registries(), DecodeMode::Strict)
                .unwrap();
            assert_eq!(value, None);
        }

        #[test]
        fn other_coins_use_multicoin_shape() {
            let coin = EVM_BIT | 10;
            let call = RecordCall::addr(node(), coin);
            assert_eq!(call.signature(), "addr(bytes32,uint256)");
            let decoded = multicoin::addrCall::abi_decode(&call.calldata()).unwrap();
            assert_eq!(decoded.coinType, U256::from(coin));

            let ret = Bytes::copy_from_slice(ADDR.as_slice()).abi_encode();
            let value = call
                .decode(&ret, &registries(), DecodeMode::Strict)
                .unwrap()
                .unwrap();
            let address = value.as_address().unwrap();
            assert_eq!(address.coin.as_deref(), Some("optimism"));
            assert_eq!(address.value, ADDR.to_checksum(None));
        }

        #[test]
        fn multicoin_empty_is_none() {
            let call = RecordCall::addr(node(), 0);
            let value = call
                .decode(&Bytes::new().abi_encode(), &registries(), DecodeMode::Strict)
                .unwrap();
            assert_eq!(value, None);
        }

        #[test]
        fn unknown_coin_passes_through() {
            let call = RecordCall::addr(node(), 0);
            let ret = Bytes::from_static(&[0x00, 0x14, 0x99]).abi_encode();
            let value = call
                .decode(&ret, &registries(), DecodeMode::Strict)
                .unwrap()
                .unwrap();
            assert_eq!(value.as_address().unwrap().value, "0x001499");
        }

        #[test]
        fn explicit_shapes() {
            assert!(RecordCall::addr_with_shape(node(), 60, AddrShape::MultiCoin).is_ok());
            assert!(RecordCall::addr_with_shape(node(), 0, AddrShape::Legacy).is_err());
        }

        #[test]
        fn set_addr_shapes() {
            let legacy = RecordCall::set_addr_legacy(node(), ADDR);
            assert_eq!(legacy.signature(), "setAddr(bytes32,address)");
            assert_eq!(
                legacy::setAddrCall::abi_decode(&legacy.calldata()).unwrap().a,
                ADDR
            );

            let multi = RecordCall::set_addr(node(), 60, ADDR.to_vec());
            assert_eq!(multi.signature(), "setAddr(bytes32,uint256,bytes)");
            let decoded = multicoin::setAddrCall::abi_decode(&multi.calldata()).unwrap();
            assert_eq!(decoded.a.as_ref(), ADDR.as_slice());
        }

        #[test]
        fn legacy_write_needs_a_full_address() {
            let err = RecordCall::set_addr_with_shape(node(), 60, AddrShape::Legacy, &[1, 2, 3])
                .unwrap_err();
            assert!(matches!(err, RecordError::InvalidAddress { coin_type: 60, .. }));
            assert!(
                RecordCall::set_addr_with_shape(node(), 0, AddrShape::Legacy, ADDR.as_slice())
                    .is_err()
            );

            let call =
                RecordCall::set_addr_with_shape(node(), 60, AddrShape::Legacy, ADDR.as_slice())
                    .unwrap();
            assert_eq!(call, RecordCall::set_addr_legacy(node(), ADDR));
            assert_eq!(
                legacy::setAddrCall::abi_decode(&call.calldata()).unwrap().a,
                ADDR
            );
        }

        #[test]
        fn multicoin_write_keeps_any_length() {
            let call =
                RecordCall::set_addr_with_shape(node(), 0, AddrShape::MultiCoin, &[1, 2, 3])
                    .unwrap();
            let decoded = multicoin::setAddrCall::abi_decode(&call.calldata()).unwrap();
            assert_eq!(decoded.a.as_ref(), [1u8, 2, 3]);
        }
    }

    mod content_hash {
        use super::*;

        #[test]
        fn decodes_through_registry() {
            let bytes = encode_content_hash("bzz://d1de9994b4d039f6548d191eb26786769f580809256b4685ef316805265ea162")
                .unwrap();
            let call = RecordCall::content_hash(node());
            let value = call
                .decode(&Bytes::from(bytes).abi_encode(), &registries(), DecodeMode::Strict)
                .unwrap()
                .unwrap();
            assert_eq!(value.as_content_hash().unwrap().protocol, Protocol::Swarm);
        }

        #[test]
        fn empty_is_none() {
            let call = RecordCall::content_hash(node());
            let value = call
                .decode(&Bytes::new().abi_encode(), &registries(), DecodeMode::Strict)
                .unwrap();
            assert_eq!(value, None);
        }

        #[test]
        fn corrupt_payload_respects_mode() {
            let call = RecordCall::content_hash(node());
            let ret = Bytes::from_static(&[0xe3, 0x01, 0x01, 0x70]).abi_encode();
            assert_eq!(call.decode(&ret, &registries(), DecodeMode::Lenient).unwrap(), None);
            assert!(matches!(
                call.decode(&ret, &registries(), DecodeMode::Strict),
                Err(DecodeError::ContentHash(_))
            ));
        }
    }

    mod abi_records {
        use super::*;

        #[test]
        fn requests_mask() {
            let call = RecordCall::abi(node(), AbiContentType::Json.into());
            let decoded = resolver::ABICall::abi_decode(&call.calldata()).unwrap();
            assert_eq!(decoded.contentTypes, U256::from(1));
        }

        #[test]
        fn decodes_requested_type() {
            let call = RecordCall::abi(node(), AbiContentTypes::ALL);
            let ret = (U256::from(1), Bytes::from_static(br#"{"a":1}"#)).abi_encode_params();
            let value = call
                .decode(&ret, &registries(), DecodeMode::Strict)
                .unwrap()
                .unwrap();
            assert_eq!(value.as_abi().unwrap(), &AbiRecord::json(json!({"a": 1})));
        }

        #[test]
        fn skips_unrequested_type() {
            let call = RecordCall::abi(node(), AbiContentType::Json.into());
            let ret = (U256::from(8), Bytes::from_static(b"ipfs://abi")).abi_encode_params();
            assert_eq!(call.decode(&ret, &registries(), DecodeMode::Strict).unwrap(), None);
        }

        #[test]
        fn set_abi_encodes_json() {
            let record = AbiRecord::json(json!([]));
            let call = RecordCall::set_abi(node(), &record).unwrap();
            let decoded = resolver::setABICall::abi_decode(&call.calldata()).unwrap();
            assert_eq!(decoded.contentType, U256::from(1));
            assert_eq!(decoded.data.as_ref(), b"[]");
        }
    }

    #[test]
    fn clear_records_has_no_value() {
        let call = RecordCall::clear_records(node());
        assert_eq!(call.signature(), "clearRecords(bytes32)");
        assert_eq!(call.node(), node());
        assert_eq!(call.decode(&[], &registries(), DecodeMode::Strict).unwrap(), None);
    }
}
