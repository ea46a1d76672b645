//! Batched resolver calls.
//!
//! Reads go through Multicall3 `tryAggregate`, which reports success per
//! call. Writes go through the resolver's own `multicall(bytes[])`.
//!
//! The batch codec threads success flags into each call's own decoder and
//! never interprets payloads itself.

use alloy::primitives::{Address, Bytes};
use alloy::sol_types::SolCall;
use tracing::{debug, trace};

use crate::config::Registries;
use crate::error::DecodeError;
use crate::records::{DecodeMode, RecordCall, RecordValue, multicall3, resolver};

/// Outcome of one call inside a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchResult {
    /// Whether the call succeeded.
    pub success: bool,
    /// Return data, or revert data on failure.
    pub return_data: Bytes,
}

impl BatchResult {
    /// A successful result.
    #[must_use]
    pub fn ok(return_data: impl Into<Bytes>) -> Self {
        Self {
            success: true,
            return_data: return_data.into(),
        }
    }

    /// A failed result carrying revert data.
    #[must_use]
    pub fn failed(revert_data: impl Into<Bytes>) -> Self {
        Self {
            success: false,
            return_data: revert_data.into(),
        }
    }
}

impl From<multicall3::CallResult> for BatchResult {
    fn from(result: multicall3::CallResult) -> Self {
        Self {
            success: result.success,
            return_data: result.returnData,
        }
    }
}

/// Encode a `tryAggregate` call sending every call to `target`.
///
/// With `require_success` the aggregate reverts as a whole if any call does.
#[must_use]
pub fn build_batch(target: Address, calls: &[RecordCall], require_success: bool) -> Bytes {
    trace!(calls = calls.len(), require_success, "building batch");
    let calls = calls
        .iter()
        .map(|call| multicall3::Call {
            target,
            callData: call.calldata(),
        })
        .collect();
    multicall3::tryAggregateCall {
        requireSuccess: require_success,
        calls,
    }
    .abi_encode()
    .into()
}

/// Decode the return data of a `tryAggregate` call built from `calls`.
///
/// # Errors
///
/// In [`DecodeMode::Strict`], returns the ABI error for a malformed
/// aggregate, or any error from [`decode_batch_results`]. In
/// [`DecodeMode::Lenient`], a malformed aggregate yields `None` for every
/// call.
pub fn decode_batch(
    data: &[u8],
    calls: &[RecordCall],
    registries: &Registries,
    mode: DecodeMode,
) -> Result<Vec<Option<RecordValue>>, DecodeError> {
    let results = match multicall3::tryAggregateCall::abi_decode_returns(data) {
        Ok(results) => results,
        Err(error) if !mode.is_strict() => {
            debug!(%error, "lenient decode dropped malformed batch");
            return Ok(vec![None; calls.len()]);
        }
        Err(error) => return Err(error.into()),
    };
    let results: Vec<BatchResult> = results.into_iter().map(BatchResult::from).collect();
    decode_batch_results(&results, calls, registries, mode)
}

/// Decode per-call results, index-aligned with `calls`.
///
/// A successful result goes to its call's decoder. A failed result is `None`
/// in [`DecodeMode::Lenient`]. In [`DecodeMode::Strict`] the call's decoder
/// runs on the revert data and its error is returned unchanged.
///
/// # Errors
///
/// Strict mode only:
/// - the first decode error, in index order
/// - [`DecodeError::CallFailed`] when a failed call's revert data still
///   decodes
/// - [`DecodeError::BatchLength`] when `results` and `calls` differ in length
pub fn decode_batch_results(
    results: &[BatchResult],
    calls: &[RecordCall],
    registries: &Registries,
    mode: DecodeMode,
) -> Result<Vec<Option<RecordValue>>, DecodeError> {
    trace!(calls = calls.len(), results = results.len(), "decoding batch");
    if results.len() != calls.len() && mode.is_strict() {
        return Err(DecodeError::BatchLength {
            expected: calls.len(),
            actual: results.len(),
        });
    }

    calls
        .iter()
        .enumerate()
        .map(|(index, call)| match results.get(index) {
            None => Ok(None),
            Some(result) if result.success => call.decode(&result.return_data, registries, mode),
            Some(_) if !mode.is_strict() => Ok(None),
            Some(result) => {
                call.try_decode(&result.return_data, registries)?;
                Err(DecodeError::CallFailed {
                    index,
                    data: result.return_data.clone(),
                })
            }
        })
        .collect()
}

/// Encode the resolver's `multicall(bytes[])` for a batch of writes.
#[must_use]
pub fn build_resolver_multicall(calls: &[RecordCall]) -> Bytes {
    trace!(calls = calls.len(), "building resolver multicall");
    resolver::multicallCall {
        data: calls.iter().map(RecordCall::calldata).collect(),
    }
    .abi_encode()
    .into()
}

#[cfg(test)]
mod tests {
    use alloy::primitives::{B256, address, keccak256};
    use alloy::sol_types::SolValue;

    use super::*;

    const MULTICALL3: Address = address!("cA11bde05977b3631167028862bE2a173976CA11");

    fn node() -> B256 {
        keccak256("batch")
    }

    fn calls() -> Vec<RecordCall> {
        vec![
            RecordCall::text(node(), "url"),
            RecordCall::text(node(), "avatar"),
            RecordCall::text(node(), "email"),
        ]
    }

    fn text(value: &str) -> Bytes {
        value.to_owned().abi_encode().into()
    }

    fn with_revert_at_1() -> Vec<BatchResult> {
        vec![
            BatchResult::ok(text("https://ens.domains")),
            BatchResult::failed(Bytes::new()),
            BatchResult::ok(text("a@b.c")),
        ]
    }

    mod build {
        use super::*;

        #[test]
        fn wraps_each_call() {
            let calls = calls();
            let data = build_batch(MULTICALL3, &calls, false);
            let decoded = multicall3::tryAggregateCall::abi_decode(&data).unwrap();
            assert!(!decoded.requireSuccess);
            assert_eq!(decoded.calls.len(), 3);
            for (sent, call) in decoded.calls.iter().zip(&calls) {
                assert_eq!(sent.target, MULTICALL3);
                assert_eq!(sent.callData, call.calldata());
            }
        }

        #[test]
        fn resolver_multicall() {
            let writes = [
                RecordCall::set_text(node(), "url", Some("https://ens.domains")),
                RecordCall::clear_records(node()),
            ];
            let data = build_resolver_multicall(&writes);
            let decoded = resolver::multicallCall::abi_decode(&data).unwrap();
            assert_eq!(decoded.data, vec![writes[0].calldata(), writes[1].calldata()]);
        }
    }

    mod partial_failure {
        use super::*;

        #[test]
        fn lenient_yields_none_at_failed_index() {
            let values = decode_batch_results(
                &with_revert_at_1(),
                &calls(),
                &Registries::default(),
                DecodeMode::Lenient,
            )
            .unwrap();
            assert_eq!(values[0], Some(RecordValue::Text("https://ens.domains".into())));
            assert_eq!(values[1], None);
            assert_eq!(values[2], Some(RecordValue::Text("a@b.c".into())));
        }

        #[test]
        fn strict_returns_the_decoder_error() {
            let err = decode_batch_results(
                &with_revert_at_1(),
                &calls(),
                &Registries::default(),
                DecodeMode::Strict,
            )
            .unwrap_err();
            let expected = resolver::textCall::abi_decode_returns(&[]).unwrap_err();
            assert!(matches!(err, DecodeError::Abi(_)));
            assert_eq!(err.to_string(), expected.to_string());
        }

        #[test]
        fn strict_flags_revert_data_that_decodes() {
            let mut results = with_revert_at_1();
            results[1] = BatchResult::failed(text("not really a revert"));
            let err = decode_batch_results(&results, &calls(), &Registries::default(), DecodeMode::Strict)
                .unwrap_err();
            assert!(matches!(err, DecodeError::CallFailed { index: 1, .. }));
        }
    }

    mod aggregate {
        use super::*;

        fn encode(results: &[BatchResult]) -> Vec<u8> {
            let results: Vec<multicall3::CallResult> = results
                .iter()
                .map(|r| multicall3::CallResult {
                    success: r.success,
                    returnData: r.return_data.clone(),
                })
                .collect();
            multicall3::tryAggregateCall::abi_encode_returns(&results)
        }

        #[test]
        fn decodes_return_data() {
            let data = encode(&with_revert_at_1());
            let values =
                decode_batch(&data, &calls(), &Registries::default(), DecodeMode::Lenient).unwrap();
            assert_eq!(values.len(), 3);
            assert_eq!(values[1], None);
        }

        #[test]
        fn malformed_aggregate() {
            let values =
                decode_batch(&[1, 2, 3], &calls(), &Registries::default(), DecodeMode::Lenient)
                    .unwrap();
            assert_eq!(values, vec![None, None, None]);
            assert!(
                decode_batch(&[1, 2, 3], &calls(), &Registries::default(), DecodeMode::Strict)
                    .is_err()
            );
        }

        #[test]
        fn length_mismatch() {
            let short = &with_revert_at_1()[..2];
            let values =
                decode_batch_results(short, &calls(), &Registries::default(), DecodeMode::Lenient)
                    .unwrap();
            assert_eq!(values.len(), 3);
            assert_eq!(values[2], None);

            let err =
                decode_batch_results(short, &calls(), &Registries::default(), DecodeMode::Strict)
                    .unwrap_err();
            assert!(matches!(err, DecodeError::BatchLength { expected: 3, actual: 2 }));
        }
    }
}
