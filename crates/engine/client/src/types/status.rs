//! Payload status returned by `engine_newPayloadV1` and `engine_forkchoiceUpdatedV1`.

use alloy_primitives::B256;
use serde::{Deserialize, Serialize};

/// Validation outcome reported by the execution node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PayloadStatusEnum {
    /// The payload is valid.
    Valid,
    /// The payload failed validation.
    Invalid,
    /// The execution node is syncing and cannot validate the payload yet.
    Syncing,
    /// The payload was accepted without full validation, e.g. it extends a side chain.
    Accepted,
    /// The block hash of the payload does not match its contents.
    InvalidBlockHash,
}

impl PayloadStatusEnum {
    /// Returns true for [`PayloadStatusEnum::Valid`].
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Returns true if the payload was rejected.
    pub const fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid | Self::InvalidBlockHash)
    }

    /// Returns true for [`PayloadStatusEnum::Syncing`].
    pub const fn is_syncing(&self) -> bool {
        matches!(self, Self::Syncing)
    }

    /// Returns true for [`PayloadStatusEnum::Accepted`].
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// Result of submitting or referencing a payload.
///
/// A validation error is only ever carried alongside a rejection status, both when built with
/// [`PayloadStatus::new`] and when decoded from the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "PayloadStatusRepr")]
pub struct PayloadStatus {
    /// The validation outcome.
    pub status: PayloadStatusEnum,
    /// Hash of the most recent valid block in the branch of the payload.
    pub latest_valid_hash: Option<B256>,
    /// Human readable reason for a rejection.
    pub validation_error: Option<String>,
}

impl PayloadStatus {
    /// Creates a new [`PayloadStatus`], discarding a validation error that does not accompany a
    /// rejection.
    pub fn new(
        status: PayloadStatusEnum,
        latest_valid_hash: Option<B256>,
        validation_error: Option<String>,
    ) -> Self {
        let validation_error =
            validation_error.filter(|err| status.is_invalid() && !err.is_empty());
        Self { status, latest_valid_hash, validation_error }
    }

    /// Creates a status without a latest valid hash or validation error.
    pub const fn from_status(status: PayloadStatusEnum) -> Self {
        Self { status, latest_valid_hash: None, validation_error: None }
    }

    /// Sets the latest valid hash.
    pub const fn with_latest_valid_hash(mut self, hash: B256) -> Self {
        self.latest_valid_hash = Some(hash);
        self
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PayloadStatusRepr {
    status: PayloadStatusEnum,
    #[serde(default)]
    latest_valid_hash: Option<B256>,
    #[serde(default)]
    validation_error: Option<String>,
}

impl From<PayloadStatusRepr> for PayloadStatus {
    fn from(repr: PayloadStatusRepr) -> Self {
        Self::new(repr.status, repr.latest_valid_hash, repr.validation_error)
    }
}
