//! Execution payload types exchanged through `engine_getPayloadV1` and `engine_newPayloadV1`.

use alloy_primitives::{Address, B64, B256, Bloom, Bytes, U256};
use core::{fmt, str::FromStr};
use serde::{Deserialize, Serialize};

/// Maximum length of the `extraData` field of an execution payload.
pub const MAX_EXTRA_DATA_BYTES: usize = 32;

/// An 8-byte identifier correlating a payload build started by a fork choice update with a later
/// `engine_getPayloadV1` call.
///
/// Serialized as a fixed-length hex string, e.g. `"0x0100000000000000"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PayloadId(pub B64);

impl PayloadId {
    /// Creates a new [`PayloadId`] from raw bytes.
    pub const fn new(bytes: [u8; 8]) -> Self {
        Self(B64::new(bytes))
    }

    /// Returns the raw bytes of the identifier.
    pub const fn as_bytes(&self) -> &[u8; 8] {
        &self.0.0
    }
}

impl From<[u8; 8]> for PayloadId {
    fn from(bytes: [u8; 8]) -> Self {
        Self::new(bytes)
    }
}

impl fmt::Display for PayloadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PayloadId {
    type Err = alloy_primitives::hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        B64::from_str(s).map(Self)
    }
}

/// An execution-layer block body as built by the execution node, or as submitted to it for
/// validation.
///
/// See <https://github.com/ethereum/execution-apis/blob/main/src/engine/paris.md#executionpayloadv1>.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionPayloadV1 {
    /// Hash of the parent block.
    pub parent_hash: B256,
    /// Recipient of the priority fees.
    pub fee_recipient: Address,
    /// Post-execution state root.
    pub state_root: B256,
    /// Root of the receipts trie.
    pub receipts_root: B256,
    /// Bloom filter of all logs in the block.
    pub logs_bloom: Bloom,
    /// Randomness value provided by the consensus layer.
    pub prev_randao: B256,
    /// Block number.
    #[serde(with = "alloy_serde::quantity")]
    pub block_number: u64,
    /// Gas limit of the block.
    #[serde(with = "alloy_serde::quantity")]
    pub gas_limit: u64,
    /// Gas consumed by the block.
    #[serde(with = "alloy_serde::quantity")]
    pub gas_used: u64,
    /// Block timestamp, in seconds.
    #[serde(with = "alloy_serde::quantity")]
    pub timestamp: u64,
    /// Arbitrary extra data, at most [`MAX_EXTRA_DATA_BYTES`] long.
    pub extra_data: Bytes,
    /// Base fee per unit of gas.
    pub base_fee_per_gas: U256,
    /// Hash of the block.
    pub block_hash: B256,
    /// Opaque, encoded transactions in block order.
    pub transactions: Vec<Bytes>,
}

impl ExecutionPayloadV1 {
    /// Checks the variable-length fields against their protocol bounds.
    ///
    /// Fixed-length fields are enforced by their types.
    pub fn validate(&self) -> Result<(), String> {
        if self.extra_data.len() > MAX_EXTRA_DATA_BYTES {
            return Err(format!(
                "extra data is {} bytes, maximum is {MAX_EXTRA_DATA_BYTES}",
                self.extra_data.len()
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures;
    use serde_json::json;

    #[test]
    fn test_payload_id_serializes_as_fixed_hex() {
        let id = PayloadId::new([1, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(serde_json::to_value(id).unwrap(), json!("0x0100000000000000"));
        assert_eq!(id.to_string(), "0x0100000000000000");
        assert_eq!("0x0100000000000000".parse::<PayloadId>().unwrap(), id);
    }

    #[test]
    fn test_payload_id_rejects_wrong_length() {
        assert!(serde_json::from_value::<PayloadId>(json!("0x01")).is_err());
        assert!("0x010000000000000000".parse::<PayloadId>().is_err());
    }

    #[test]
    fn test_execution_payload_wire_format() {
        let payload = fixtures::execution_payload();
        let value = serde_json::to_value(&payload).unwrap();

        assert_eq!(value["blockNumber"], json!("0x1"));
        assert_eq!(value["gasLimit"], json!("0x1"));
        assert_eq!(value["baseFeePerGas"], json!("0x6"));
        assert_eq!(
            value["parentHash"],
            json!("0x666f6f0000000000000000000000000000000000000000000000000000000000")
        );
        assert_eq!(value["feeRecipient"], json!("0x6261720000000000000000000000000000000000"));
        assert_eq!(value["logsBloom"].as_str().unwrap().len(), 2 + 2 * 256);
        assert_eq!(value["transactions"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_execution_payload_missing_field_fails() {
        let mut value = serde_json::to_value(fixtures::execution_payload()).unwrap();
        value.as_object_mut().unwrap().remove("blockHash");
        assert!(serde_json::from_value::<ExecutionPayloadV1>(value).is_err());
    }

    #[test]
    fn test_execution_payload_extra_data_bounds() {
        let mut payload = fixtures::execution_payload();
        payload.extra_data = Bytes::new();
        assert!(payload.validate().is_ok());

        payload.extra_data = Bytes::from(vec![0xff; MAX_EXTRA_DATA_BYTES]);
        assert!(payload.validate().is_ok());

        payload.extra_data = Bytes::from(vec![0xff; MAX_EXTRA_DATA_BYTES + 1]);
        assert_eq!(payload.validate().unwrap_err(), "extra data is 33 bytes, maximum is 32");
    }
}
