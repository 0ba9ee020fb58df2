//! Read-only block projection returned by `eth_getBlockByHash` and `eth_getBlockByNumber`.

use alloy_primitives::{Address, B256, Bloom, Bytes, U256};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Transactions of an [`ExecutionBlock`], in block order.
///
/// Nodes return hashes or full transaction objects depending on the `full` flag of the query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BlockTransactions {
    /// Transaction hashes only.
    Hashes(Vec<B256>),
    /// Full transaction objects, kept as raw JSON.
    Full(Vec<Map<String, Value>>),
}

impl Default for BlockTransactions {
    fn default() -> Self {
        Self::Hashes(Vec::new())
    }
}

impl BlockTransactions {
    /// Number of transactions.
    pub fn len(&self) -> usize {
        match self {
            Self::Hashes(hashes) => hashes.len(),
            Self::Full(txs) => txs.len(),
        }
    }

    /// Returns true if the block has no transactions.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the transaction hashes in block order.
    ///
    /// Full transaction objects without a well-formed `hash` member are skipped.
    pub fn hashes(&self) -> Vec<B256> {
        match self {
            Self::Hashes(hashes) => hashes.clone(),
            Self::Full(txs) => txs
                .iter()
                .filter_map(|tx| tx.get("hash"))
                .filter_map(|hash| serde_json::from_value(hash.clone()).ok())
                .collect(),
        }
    }
}

/// An execution block header together with its transaction and uncle identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionBlock {
    /// Block number.
    #[serde(with = "alloy_serde::quantity")]
    pub number: u64,
    /// Block hash.
    pub hash: B256,
    /// Parent block hash.
    pub parent_hash: B256,
    /// Root of the uncle list.
    pub sha3_uncles: B256,
    /// Beneficiary of the block rewards.
    pub miner: Address,
    /// Post-execution state root.
    pub state_root: B256,
    /// Root of the transactions trie.
    pub transactions_root: B256,
    /// Root of the receipts trie.
    pub receipts_root: B256,
    /// Bloom filter of all logs in the block.
    pub logs_bloom: Bloom,
    /// Block difficulty.
    pub difficulty: U256,
    /// Total difficulty of the chain up to and including this block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_difficulty: Option<U256>,
    /// Gas limit.
    #[serde(with = "alloy_serde::quantity")]
    pub gas_limit: u64,
    /// Gas used.
    #[serde(with = "alloy_serde::quantity")]
    pub gas_used: u64,
    /// Block timestamp, in seconds.
    #[serde(with = "alloy_serde::quantity")]
    pub timestamp: u64,
    /// Encoded size of the block, in bytes.
    #[serde(with = "alloy_serde::quantity")]
    pub size: u64,
    /// Arbitrary extra data.
    pub extra_data: Bytes,
    /// Base fee per gas. Absent before London.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_fee_per_gas: Option<U256>,
    /// Transactions in block order.
    #[serde(default)]
    pub transactions: BlockTransactions,
    /// Hashes of the uncles.
    #[serde(default)]
    pub uncles: Vec<B256>,
}
