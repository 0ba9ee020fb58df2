//! HTTP transport.

use super::EngineTransport;
use crate::RawRpcError;
use alloy_rpc_client::RpcClient;
use async_trait::async_trait;
use serde_json::Value;
use url::Url;

/// Sends engine calls as JSON-RPC over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    url: Url,
    client: RpcClient,
}

impl HttpTransport {
    /// Creates a transport for `url`. No connection is made until the first call.
    pub fn new(url: Url) -> Self {
        let client = RpcClient::new_http(url.clone());
        Self { url, client }
    }

    /// Returns the endpoint URL.
    pub const fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl EngineTransport for HttpTransport {
    async fn call(&self, method: &'static str, params: Vec<Value>) -> Result<Value, RawRpcError> {
        self.client.request::<_, Value>(method, params).await.map_err(Into::into)
    }
}
