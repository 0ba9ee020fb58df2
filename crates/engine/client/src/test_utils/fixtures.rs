//! Fixture values for engine tests.
//!
//! Every function builds a fresh value, so tests can mutate what they get back.

use crate::{
    BlockTransactions, ExecutionBlock, ExecutionPayloadV1, ForkchoiceState, ForkchoiceUpdated,
    PayloadAttributesV1, PayloadId, PayloadStatus, PayloadStatusEnum, TransitionConfiguration,
};
use alloy_primitives::{Address, B256, Bloom, Bytes, U256};

/// Copies `s` into an `N` byte array, right-padded with zeros and truncated if longer.
pub fn padded<const N: usize>(s: &str) -> [u8; N] {
    let mut out = [0u8; N];
    let len = s.len().min(N);
    out[..len].copy_from_slice(&s.as_bytes()[..len]);
    out
}

/// `s` right-padded to a 32-byte hash.
pub fn hash(s: &str) -> B256 {
    B256::new(padded(s))
}

/// `s` right-padded to a 20-byte address.
pub fn address(s: &str) -> Address {
    Address::new(padded(s))
}

/// `s` right-padded to a 256-byte bloom.
pub fn bloom(s: &str) -> Bloom {
    Bloom::new(padded(s))
}

/// The payload id handed out by the mock engine.
pub const fn payload_id() -> PayloadId {
    PayloadId::new([1, 0, 0, 0, 0, 0, 0, 0])
}

/// A payload with every field populated.
pub fn execution_payload() -> ExecutionPayloadV1 {
    let foo = hash("foo");
    ExecutionPayloadV1 {
        parent_hash: foo,
        fee_recipient: address("bar"),
        state_root: foo,
        receipts_root: foo,
        logs_bloom: bloom("baz"),
        prev_randao: foo,
        block_number: 1,
        gas_limit: 1,
        gas_used: 1,
        timestamp: 1,
        extra_data: Bytes::copy_from_slice(foo.as_slice()),
        base_fee_per_gas: U256::from(6),
        block_hash: foo,
        transactions: vec![Bytes::copy_from_slice(foo.as_slice())],
    }
}

/// The status returned by the mock engine for new payloads and fork choice updates.
pub fn payload_status() -> PayloadStatus {
    PayloadStatus::from_status(PayloadStatusEnum::Accepted).with_latest_valid_hash(hash("foo"))
}

/// A fork choice update result, with `payload_id` if building was requested.
pub fn forkchoice_updated(payload_id: Option<PayloadId>) -> ForkchoiceUpdated {
    let updated = ForkchoiceUpdated::new(payload_status());
    match payload_id {
        Some(id) => updated.with_payload_id(id),
        None => updated,
    }
}

/// A fork choice state with distinct head, safe and finalized hashes.
pub fn forkchoice_state() -> ForkchoiceState {
    ForkchoiceState {
        head_block_hash: hash("head"),
        safe_block_hash: hash("safe"),
        finalized_block_hash: hash("finalized"),
    }
}

/// Attributes requesting a payload build.
pub fn payload_attributes() -> PayloadAttributesV1 {
    PayloadAttributesV1 {
        timestamp: 1,
        prev_randao: hash("random"),
        suggested_fee_recipient: address("fee"),
    }
}

/// The mainnet transition configuration before the terminal block was known.
pub fn transition_configuration() -> TransitionConfiguration {
    TransitionConfiguration {
        terminal_total_difficulty: U256::from(58_750_000_000_000_000_000_000u128),
        terminal_block_hash: B256::ZERO,
        terminal_block_number: 0,
    }
}

/// A block with every field populated and one transaction hash.
pub fn execution_block() -> ExecutionBlock {
    let foo = hash("foo");
    ExecutionBlock {
        number: 100,
        hash: hash("hash"),
        parent_hash: hash("parentHash"),
        sha3_uncles: hash("sha3Uncles"),
        miner: address("miner"),
        state_root: hash("stateRoot"),
        transactions_root: hash("txRoot"),
        receipts_root: hash("receiptsRoot"),
        logs_bloom: bloom("logs"),
        difficulty: U256::from(1),
        total_difficulty: Some(U256::from(2)),
        gas_limit: 3,
        gas_used: 4,
        timestamp: 5,
        size: 6,
        extra_data: Bytes::copy_from_slice(hash("extraData").as_slice()),
        base_fee_per_gas: Some(U256::from(6)),
        transactions: BlockTransactions::Hashes(vec![foo]),
        uncles: vec![foo],
    }
}
