//! ABI fragments for resolver and multicall contracts.

/// Public resolver record functions.
pub(crate) mod resolver {
    alloy::sol! {
        function text(bytes32 node, string key) external view returns (string);
        function setText(bytes32 node, string key, string value) external;
        function contenthash(bytes32 node) external view returns (bytes);
        function setContenthash(bytes32 node, bytes hash) external;
        function ABI(bytes32 node, uint256 contentTypes) external view returns (uint256 contentType, bytes data);
        function setABI(bytes32 node, uint256 contentType, bytes data) external;
        function clearRecords(bytes32 node) external;
        function multicall(bytes[] data) external returns (bytes[] results);
    }
}

/// Pre-EIP-2304 single-coin (ETH only) address functions.
pub(crate) mod legacy {
    alloy::sol! {
        function addr(bytes32 node) external view returns (address);
        function setAddr(bytes32 node, address a) external;
    }
}

/// EIP-2304 multi-coin address functions.
pub(crate) mod multicoin {
    alloy::sol! {
        function addr(bytes32 node, uint256 coinType) external view returns (bytes);
        function setAddr(bytes32 node, uint256 coinType, bytes a) external;
    }
}

/// Multicall3 `tryAggregate`.
pub(crate) mod multicall3 {
    alloy::sol! {
        struct Call {
            address target;
            bytes callData;
        }

        struct CallResult {
            bool success;
            bytes returnData;
        }

        function tryAggregate(bool requireSuccess, Call[] calls) external returns (CallResult[] returnData);
    }
}
