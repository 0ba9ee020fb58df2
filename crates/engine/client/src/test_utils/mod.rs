//! Test utilities for the engine client.
//!
//! [`MockEngine`] stands in for an execution node. It answers every engine method with a fixture
//! unless a [`MockReply`] was scripted for it, and records the parameters of every call. It can be
//! used directly as an [`EngineTransport`] or served over HTTP and IPC through [`MockServer`].

use crate::{
    BLOCK_BY_HASH, BLOCK_BY_NUMBER, EXCHANGE_TRANSITION_CONFIGURATION_V1, EngineTransport,
    FORKCHOICE_UPDATED_V1, GET_PAYLOAD_V1, NEW_PAYLOAD_V1, RawRpcError, error::codes,
};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;

pub mod fixtures;

mod server;
pub use server::{MockServer, TransportKind};

/// Every method the mock engine serves.
pub const ENGINE_METHODS: [&str; 6] = [
    GET_PAYLOAD_V1,
    FORKCHOICE_UPDATED_V1,
    NEW_PAYLOAD_V1,
    EXCHANGE_TRANSITION_CONFIGURATION_V1,
    BLOCK_BY_NUMBER,
    BLOCK_BY_HASH,
];

/// A scripted answer for one method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockReply {
    /// Answer with this result.
    Result(Value),
    /// Answer with a JSON-RPC error.
    Error {
        /// The error code.
        code: i64,
        /// The error message.
        message: String,
        /// The optional `data` member.
        data: Option<Value>,
    },
    /// Never answer.
    Stall,
}

impl MockReply {
    /// An error reply without data.
    pub fn error(code: i64, message: impl Into<String>) -> Self {
        Self::Error { code, message: message.into(), data: None }
    }

    /// An error reply with data.
    pub fn error_with_data(code: i64, message: impl Into<String>, data: Value) -> Self {
        Self::Error { code, message: message.into(), data: Some(data) }
    }
}

/// A call received by the [`MockEngine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    /// The method name.
    pub method: String,
    /// The positional parameters, as received.
    pub params: Vec<Value>,
}

#[derive(Debug, Default)]
struct MockEngineState {
    replies: RwLock<HashMap<String, MockReply>>,
    calls: RwLock<Vec<RecordedCall>>,
}

/// A scripted execution node. Clones share replies and the call log.
#[derive(Debug, Clone, Default)]
pub struct MockEngine {
    state: Arc<MockEngineState>,
}

impl MockEngine {
    /// Creates a mock engine that answers every method with its fixture.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the reply for `method`, replacing any earlier one.
    pub async fn set_reply(&self, method: &str, reply: MockReply) {
        self.state.replies.write().await.insert(method.to_owned(), reply);
    }

    /// Returns every call received so far, in arrival order.
    pub async fn calls(&self) -> Vec<RecordedCall> {
        self.state.calls.read().await.clone()
    }

    /// Returns the parameters of every call to `method`, in arrival order.
    pub async fn params(&self, method: &str) -> Vec<Vec<Value>> {
        self.state
            .calls
            .read()
            .await
            .iter()
            .filter(|call| call.method == method)
            .map(|call| call.params.clone())
            .collect()
    }

    /// Records the call and produces its reply.
    pub async fn handle(&self, method: &str, params: Vec<Value>) -> Result<Value, RawRpcError> {
        self.state
            .calls
            .write()
            .await
            .push(RecordedCall { method: method.to_owned(), params: params.clone() });

        let scripted = self.state.replies.read().await.get(method).cloned();
        match scripted {
            Some(MockReply::Result(value)) => Ok(value),
            Some(MockReply::Error { code, message, data }) => {
                Err(RawRpcError::coded(code, message, data))
            }
            Some(MockReply::Stall) => std::future::pending().await,
            None => Self::default_reply(method, params),
        }
    }

    fn default_reply(method: &str, params: Vec<Value>) -> Result<Value, RawRpcError> {
        match method {
            GET_PAYLOAD_V1 => Ok(json!(fixtures::execution_payload())),
            NEW_PAYLOAD_V1 => Ok(json!(fixtures::payload_status())),
            FORKCHOICE_UPDATED_V1 => {
                let building = params.get(1).is_some_and(|attrs| !attrs.is_null());
                Ok(json!(fixtures::forkchoice_updated(building.then(fixtures::payload_id))))
            }
            EXCHANGE_TRANSITION_CONFIGURATION_V1 => {
                Ok(params.into_iter().next().unwrap_or(Value::Null))
            }
            BLOCK_BY_NUMBER | BLOCK_BY_HASH => Ok(json!(fixtures::execution_block())),
            _ => Err(RawRpcError::coded(
                codes::METHOD_NOT_FOUND,
                format!("the method {method} does not exist/is not available"),
                None,
            )),
        }
    }
}

#[async_trait]
impl EngineTransport for MockEngine {
    async fn call(&self, method: &'static str, params: Vec<Value>) -> Result<Value, RawRpcError> {
        self.handle(method, params).await
    }
}
