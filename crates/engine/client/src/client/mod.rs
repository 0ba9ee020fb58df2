//! The Engine API method client.

use crate::{
    CallContext, EngineApiError, EngineClientConfig, EngineEndpoint, EngineTransport,
    ExecutionBlock, ExecutionPayloadV1, ForkchoiceState, ForkchoiceUpdated, HttpTransport,
    IpcTransport, PayloadAttributesV1, PayloadId, PayloadStatus, TransitionConfiguration,
    TransportBuildError, classify_result, context::Interrupt,
};
use alloy_eips::BlockNumberOrTag;
use alloy_primitives::B256;
use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::{fmt::Debug, time::Duration};
use tokio::time::Instant;

#[cfg(feature = "metrics")]
use crate::metrics::Metrics;

/// Retrieves a payload previously requested through a fork choice update.
pub const GET_PAYLOAD_V1: &str = "engine_getPayloadV1";
/// Updates the fork choice, optionally starting a payload build.
pub const FORKCHOICE_UPDATED_V1: &str = "engine_forkchoiceUpdatedV1";
/// Submits a payload for validation.
pub const NEW_PAYLOAD_V1: &str = "engine_newPayloadV1";
/// Exchanges the terminal block transition configuration.
pub const EXCHANGE_TRANSITION_CONFIGURATION_V1: &str = "engine_exchangeTransitionConfigurationV1";
/// Fetches a block by number or tag.
pub const BLOCK_BY_NUMBER: &str = "eth_getBlockByNumber";
/// Fetches a block by hash.
pub const BLOCK_BY_HASH: &str = "eth_getBlockByHash";

/// The Engine API as seen by the consensus layer.
///
/// Every method performs exactly one round trip and honours the given [`CallContext`].
#[async_trait]
#[auto_impl::auto_impl(&, Arc, Box)]
pub trait EngineApi: Debug + Send + Sync {
    /// Calls `engine_getPayloadV1`.
    async fn get_payload_v1(
        &self,
        ctx: &CallContext,
        payload_id: PayloadId,
    ) -> Result<ExecutionPayloadV1, EngineApiError>;

    /// Calls `engine_forkchoiceUpdatedV1`. `attributes` is sent as `null` when absent.
    async fn fork_choice_updated_v1(
        &self,
        ctx: &CallContext,
        state: ForkchoiceState,
        attributes: Option<PayloadAttributesV1>,
    ) -> Result<ForkchoiceUpdated, EngineApiError>;

    /// Calls `engine_newPayloadV1`.
    ///
    /// Fails with [`EngineApiError::InvalidPayload`] without contacting the node if the payload
    /// violates protocol bounds.
    async fn new_payload_v1(
        &self,
        ctx: &CallContext,
        payload: ExecutionPayloadV1,
    ) -> Result<PayloadStatus, EngineApiError>;

    /// Calls `engine_exchangeTransitionConfigurationV1`.
    ///
    /// Fails with [`EngineApiError::ConfigMismatch`] if the node reports a different terminal
    /// total difficulty.
    async fn exchange_transition_configuration_v1(
        &self,
        ctx: &CallContext,
        config: TransitionConfiguration,
    ) -> Result<TransitionConfiguration, EngineApiError>;

    /// Fetches the latest block with full transactions.
    async fn latest_execution_block(
        &self,
        ctx: &CallContext,
    ) -> Result<Option<ExecutionBlock>, EngineApiError> {
        self.execution_block_by_number(ctx, BlockNumberOrTag::Latest).await
    }

    /// Fetches a block by number or tag with full transactions. `None` if the node does not know
    /// the block.
    async fn execution_block_by_number(
        &self,
        ctx: &CallContext,
        number: BlockNumberOrTag,
    ) -> Result<Option<ExecutionBlock>, EngineApiError>;

    /// Fetches a block by hash with full transactions. `None` if the node does not know the block.
    async fn execution_block_by_hash(
        &self,
        ctx: &CallContext,
        hash: B256,
    ) -> Result<Option<ExecutionBlock>, EngineApiError>;
}

/// An [`EngineApi`] implementation over an [`EngineTransport`].
///
/// The client holds no state besides its transport and is safe to share across tasks.
#[derive(Debug, Clone)]
pub struct EngineClient<T = Box<dyn EngineTransport>> {
    transport: T,
    timeout: Option<Duration>,
}

impl EngineClient {
    /// Connects to the endpoint in `config`, using its timeout as the default deadline.
    pub async fn connect(config: &EngineClientConfig) -> Result<Self, TransportBuildError> {
        let transport: Box<dyn EngineTransport> = match &config.endpoint {
            EngineEndpoint::Http(url) => Box::new(HttpTransport::new(url.clone())),
            EngineEndpoint::Ipc(path) => Box::new(IpcTransport::connect(path.clone()).await?),
        };

        info!(target: "engine_client", endpoint = %config.endpoint, "Engine client ready");
        let client = Self::new(transport);
        Ok(match config.timeout() {
            Some(timeout) => client.with_timeout(timeout),
            None => client,
        })
    }
}

impl<T: EngineTransport> EngineClient<T> {
    /// Creates a client without a default deadline.
    pub const fn new(transport: T) -> Self {
        Self { transport, timeout: None }
    }

    /// Sets the timeout applied by [`EngineClient::default_context`].
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Returns the transport.
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns a fresh context carrying the configured timeout, if any.
    pub fn default_context(&self) -> CallContext {
        self.timeout.map_or_else(CallContext::background, CallContext::with_timeout)
    }

    async fn request<R: DeserializeOwned>(
        &self,
        ctx: &CallContext,
        method: &'static str,
        params: Vec<Value>,
    ) -> Result<R, EngineApiError> {
        debug!(target: "engine_client", method, "Dispatching engine call");
        let start = Instant::now();

        let result = self.dispatch(ctx, method, params).await;
        let elapsed = start.elapsed();
        match &result {
            Ok(_) => debug!(target: "engine_client", method, ?elapsed, "Engine call succeeded"),
            Err(err) if err.is_cancellation() => {
                debug!(target: "engine_client", method, %err, "Engine call interrupted")
            }
            Err(err) => warn!(
                target: "engine_client",
                method,
                kind = %err.kind(),
                code = ?err.rpc_error().and_then(|err| err.code()),
                %err,
                ?elapsed,
                "Engine call failed"
            ),
        }

        #[cfg(feature = "metrics")]
        Metrics::record_call(method, &result, elapsed);

        result
    }

    async fn dispatch<R: DeserializeOwned>(
        &self,
        ctx: &CallContext,
        method: &'static str,
        params: Vec<Value>,
    ) -> Result<R, EngineApiError> {
        let raw = ctx.run(self.transport.call(method, params)).await.map_err(|interrupt| {
            match interrupt {
                Interrupt::Cancelled => EngineApiError::Cancelled { method },
                Interrupt::DeadlineExceeded => EngineApiError::DeadlineExceeded { method },
            }
        })?;
        let value = classify_result(raw).map_err(|source| EngineApiError::Rpc { method, source })?;
        serde_json::from_value(value).map_err(|source| EngineApiError::Decode { method, source })
    }
}

fn encode<P: Serialize>(method: &'static str, param: P) -> Result<Value, EngineApiError> {
    serde_json::to_value(param).map_err(|source| EngineApiError::Encode { method, source })
}

#[async_trait]
impl<T: EngineTransport> EngineApi for EngineClient<T> {
    async fn get_payload_v1(
        &self,
        ctx: &CallContext,
        payload_id: PayloadId,
    ) -> Result<ExecutionPayloadV1, EngineApiError> {
        let params = vec![encode(GET_PAYLOAD_V1, payload_id)?];
        self.request(ctx, GET_PAYLOAD_V1, params).await
    }

    async fn fork_choice_updated_v1(
        &self,
        ctx: &CallContext,
        state: ForkchoiceState,
        attributes: Option<PayloadAttributesV1>,
    ) -> Result<ForkchoiceUpdated, EngineApiError> {
        let params =
            vec![encode(FORKCHOICE_UPDATED_V1, state)?, encode(FORKCHOICE_UPDATED_V1, attributes)?];
        self.request(ctx, FORKCHOICE_UPDATED_V1, params).await
    }

    async fn new_payload_v1(
        &self,
        ctx: &CallContext,
        payload: ExecutionPayloadV1,
    ) -> Result<PayloadStatus, EngineApiError> {
        if let Err(reason) = payload.validate() {
            warn!(
                target: "engine_client",
                method = NEW_PAYLOAD_V1,
                %reason,
                "Refusing to send invalid payload"
            );
            return Err(EngineApiError::InvalidPayload { method: NEW_PAYLOAD_V1, reason });
        }
        let params = vec![encode(NEW_PAYLOAD_V1, payload)?];
        self.request(ctx, NEW_PAYLOAD_V1, params).await
    }

    async fn exchange_transition_configuration_v1(
        &self,
        ctx: &CallContext,
        config: TransitionConfiguration,
    ) -> Result<TransitionConfiguration, EngineApiError> {
        let params = vec![encode(EXCHANGE_TRANSITION_CONFIGURATION_V1, config)?];
        let remote: TransitionConfiguration =
            self.request(ctx, EXCHANGE_TRANSITION_CONFIGURATION_V1, params).await?;

        if remote.terminal_total_difficulty != config.terminal_total_difficulty {
            warn!(
                target: "engine_client",
                local = %config.terminal_total_difficulty,
                remote = %remote.terminal_total_difficulty,
                "Terminal total difficulty mismatch"
            );
            return Err(EngineApiError::ConfigMismatch {
                local: config.terminal_total_difficulty,
                remote: remote.terminal_total_difficulty,
            });
        }
        Ok(remote)
    }

    async fn execution_block_by_number(
        &self,
        ctx: &CallContext,
        number: BlockNumberOrTag,
    ) -> Result<Option<ExecutionBlock>, EngineApiError> {
        let params = vec![encode(BLOCK_BY_NUMBER, number)?, Value::Bool(true)];
        self.request(ctx, BLOCK_BY_NUMBER, params).await
    }

    async fn execution_block_by_hash(
        &self,
        ctx: &CallContext,
        hash: B256,
    ) -> Result<Option<ExecutionBlock>, EngineApiError> {
        let params = vec![encode(BLOCK_BY_HASH, hash)?, Value::Bool(true)];
        self.request(ctx, BLOCK_BY_HASH, params).await
    }
}
