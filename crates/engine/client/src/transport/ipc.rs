//! IPC transport over a unix socket or named pipe.

use super::{EngineTransport, TransportBuildError};
use crate::RawRpcError;
use alloy_rpc_client::{ClientBuilder, RpcClient};
use alloy_transport_ipc::IpcConnect;
use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Sends engine calls as JSON-RPC over a local socket.
#[derive(Debug, Clone)]
pub struct IpcTransport {
    path: PathBuf,
    client: RpcClient,
}

impl IpcTransport {
    /// Connects to the socket at `path`.
    pub async fn connect(path: impl Into<PathBuf>) -> Result<Self, TransportBuildError> {
        let path = path.into();
        let client = ClientBuilder::default()
            .ipc(IpcConnect::new(path.clone()))
            .await
            .map_err(|err| TransportBuildError::Ipc {
                path: path.clone(),
                message: err.to_string(),
            })?;

        debug!(target: "engine_client", path = %path.display(), "Connected IPC transport");
        Ok(Self { path, client })
    }

    /// Returns the socket path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl EngineTransport for IpcTransport {
    async fn call(&self, method: &'static str, params: Vec<Value>) -> Result<Value, RawRpcError> {
        self.client.request::<_, Value>(method, params).await.map_err(Into::into)
    }
}
