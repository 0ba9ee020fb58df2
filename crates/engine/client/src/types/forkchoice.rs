//! Fork choice types used by `engine_forkchoiceUpdatedV1`.

use super::{PayloadId, PayloadStatus};
use alloy_primitives::{Address, B256};
use serde::{Deserialize, Serialize};

/// The consensus layer's view of the canonical chain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForkchoiceState {
    /// Hash of the head of the canonical chain.
    pub head_block_hash: B256,
    /// Hash of the most recent "safe" block.
    pub safe_block_hash: B256,
    /// Hash of the most recent finalized block.
    pub finalized_block_hash: B256,
}

/// Instructions for the execution node to start building a payload on top of the new head.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadAttributesV1 {
    /// Timestamp of the payload to build.
    #[serde(with = "alloy_serde::quantity")]
    pub timestamp: u64,
    /// Randomness value for the payload.
    pub prev_randao: B256,
    /// Suggested recipient of the priority fees.
    pub suggested_fee_recipient: Address,
}

/// Response of `engine_forkchoiceUpdatedV1`.
///
/// `payload_id` is only set when payload attributes were supplied and the build was started.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForkchoiceUpdated {
    /// Status of the new head.
    #[serde(alias = "status")]
    pub payload_status: PayloadStatus,
    /// Identifier of the payload build process, if one was started.
    #[serde(default)]
    pub payload_id: Option<PayloadId>,
}

impl ForkchoiceUpdated {
    /// Creates a response without a payload id.
    pub const fn new(payload_status: PayloadStatus) -> Self {
        Self { payload_status, payload_id: None }
    }

    /// Sets the payload id.
    pub const fn with_payload_id(mut self, payload_id: PayloadId) -> Self {
        self.payload_id = Some(payload_id);
        self
    }
}
