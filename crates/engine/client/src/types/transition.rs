//! Terminal block configuration exchanged through `engine_exchangeTransitionConfigurationV1`.

use alloy_primitives::{B256, U256};
use serde::{Deserialize, Serialize};

/// Parameters of the proof-of-work to proof-of-stake transition, as configured on each layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionConfiguration {
    /// Total difficulty at which the transition happens.
    pub terminal_total_difficulty: U256,
    /// Hash of the terminal block, or zero if not yet known.
    pub terminal_block_hash: B256,
    /// Number of the terminal block, or zero if not yet known.
    #[serde(with = "alloy_serde::quantity")]
    pub terminal_block_number: u64,
}
