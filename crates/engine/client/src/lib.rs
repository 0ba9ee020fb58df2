#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

#[macro_use]
extern crate tracing;

mod client;
pub use client::{
    BLOCK_BY_HASH, BLOCK_BY_NUMBER, EXCHANGE_TRANSITION_CONFIGURATION_V1, EngineApi, EngineClient,
    FORKCHOICE_UPDATED_V1, GET_PAYLOAD_V1, NEW_PAYLOAD_V1,
};

mod config;
pub use config::{
    DEFAULT_ENGINE_RPC, DEFAULT_ENGINE_TIMEOUT_SECS, EngineClientConfig, EngineEndpoint,
};

mod context;
pub use context::CallContext;

mod error;
pub use error::{EngineApiError, ErrorKind, RawRpcError, RpcError, classify_result, codes};

mod metrics;
pub use metrics::describe_engine_client_metrics;

mod transport;
pub use transport::{EngineTransport, HttpTransport, IpcTransport, TransportBuildError};

mod types;
pub use types::{
    BlockTransactions, ExecutionBlock, ExecutionPayloadV1, ForkchoiceState, ForkchoiceUpdated,
    MAX_EXTRA_DATA_BYTES, PayloadAttributesV1, PayloadId, PayloadStatus, PayloadStatusEnum,
    TransitionConfiguration,
};

pub use alloy_eips::BlockNumberOrTag;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
