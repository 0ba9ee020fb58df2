//! Transports that carry engine calls to the execution node.

use crate::RawRpcError;
use alloy_json_rpc::RpcError as AlloyRpcError;
use alloy_transport::TransportError;
use async_trait::async_trait;
use serde_json::Value;
use std::{fmt::Debug, path::PathBuf};
use thiserror::Error;

mod http;
pub use http::HttpTransport;

mod ipc;
pub use ipc::IpcTransport;

/// Sends one JSON-RPC request and returns the raw result.
///
/// Implementations must report JSON-RPC error responses through the coded [`RawRpcError`]
/// shapes, so that an error envelope is never mistaken for a `null` result.
#[async_trait]
#[auto_impl::auto_impl(&, Arc, Box)]
pub trait EngineTransport: Debug + Send + Sync {
    /// Calls `method` with positional `params`.
    async fn call(&self, method: &'static str, params: Vec<Value>) -> Result<Value, RawRpcError>;
}

impl From<TransportError> for RawRpcError {
    fn from(err: TransportError) -> Self {
        match err {
            AlloyRpcError::ErrorResp(payload) => {
                let data = payload.data.map(|raw| {
                    serde_json::from_str(raw.get())
                        .unwrap_or_else(|_| Value::String(raw.get().to_owned()))
                });
                Self::coded(payload.code, payload.message.into_owned(), data)
            }
            err => Self::uncoded(err.to_string()),
        }
    }
}

/// An error raised while setting up a transport.
#[derive(Debug, Error)]
pub enum TransportBuildError {
    /// The endpoint string is neither a URL nor a path.
    #[error("invalid engine endpoint: {0:?}")]
    InvalidEndpoint(String),
    /// The IPC socket could not be opened.
    #[error("failed to connect to IPC socket {}: {message}", path.display())]
    Ipc {
        /// The socket path.
        path: PathBuf,
        /// The underlying transport error.
        message: String,
    },
}
