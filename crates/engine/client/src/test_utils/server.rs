//! Serves a [`MockEngine`] over HTTP or IPC.

use super::{ENGINE_METHODS, MockEngine};
use crate::{EngineClient, EngineClientConfig, EngineEndpoint, RawRpcError, TransportBuildError};
use jsonrpsee::{
    RpcModule,
    server::{Server, ServerHandle},
    types::{ErrorObject, ErrorObjectOwned},
};
use serde_json::Value;
use std::io;
use tokio::task::JoinHandle;

/// Which transport a [`MockServer`] listens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// JSON-RPC over HTTP on a loopback port.
    Http,
    /// JSON-RPC over a unix socket in a temporary directory.
    Ipc,
}

#[derive(Debug)]
enum ServerGuard {
    Http(ServerHandle),
    Ipc { task: JoinHandle<()>, _dir: tempfile::TempDir },
}

/// A running mock execution node. Stopped when dropped.
#[derive(Debug)]
pub struct MockServer {
    engine: MockEngine,
    endpoint: EngineEndpoint,
    guard: ServerGuard,
}

impl MockServer {
    /// Serves `engine` over the given transport.
    pub async fn spawn(kind: TransportKind, engine: MockEngine) -> io::Result<Self> {
        let (endpoint, guard) = match kind {
            TransportKind::Http => spawn_http(engine.clone()).await?,
            TransportKind::Ipc => spawn_ipc(engine.clone()).await?,
        };
        Ok(Self { engine, endpoint, guard })
    }

    /// Returns the engine behind the server.
    pub const fn engine(&self) -> &MockEngine {
        &self.engine
    }

    /// Returns the endpoint the server listens on.
    pub const fn endpoint(&self) -> &EngineEndpoint {
        &self.endpoint
    }

    /// Connects a client to the server, without a default deadline.
    pub async fn client(&self) -> Result<EngineClient, TransportBuildError> {
        let config = EngineClientConfig { endpoint: self.endpoint.clone(), timeout_secs: 0 };
        EngineClient::connect(&config).await
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        match &self.guard {
            ServerGuard::Http(handle) => {
                let _ = handle.stop();
            }
            ServerGuard::Ipc { task, .. } => task.abort(),
        }
    }
}

/// Shapes a mock failure as a JSON-RPC error object. Codes outside the `i32` range and uncoded
/// failures are reported as internal errors.
fn error_object(err: RawRpcError) -> ErrorObjectOwned {
    let code = err
        .code()
        .and_then(|code| i32::try_from(code).ok())
        .unwrap_or(jsonrpsee::types::error::INTERNAL_ERROR_CODE);
    ErrorObject::owned(code, err.message().to_owned(), err.data().cloned())
}

async fn spawn_http(engine: MockEngine) -> io::Result<(EngineEndpoint, ServerGuard)> {
    let server = Server::builder().build("127.0.0.1:0").await?;
    let addr = server.local_addr()?;

    let mut module = RpcModule::new(engine);
    for method in ENGINE_METHODS {
        module
            .register_async_method(method, move |params, engine, _| async move {
                let params = params.parse::<Vec<Value>>()?;
                engine.handle(method, params).await.map_err(error_object)
            })
            .map_err(io::Error::other)?;
    }

    let url = format!("http://{addr}")
        .parse()
        .map_err(|err: url::ParseError| io::Error::new(io::ErrorKind::InvalidInput, err))?;
    Ok((EngineEndpoint::Http(url), ServerGuard::Http(server.start(module))))
}

#[cfg(unix)]
async fn spawn_ipc(engine: MockEngine) -> io::Result<(EngineEndpoint, ServerGuard)> {
    use tokio::net::UnixListener;

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("engine.ipc");
    let listener = UnixListener::bind(&path)?;

    let task = tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            tokio::spawn(ipc::serve_connection(stream, engine.clone()));
        }
    });
    Ok((EngineEndpoint::Ipc(path), ServerGuard::Ipc { task, _dir: dir }))
}

#[cfg(not(unix))]
async fn spawn_ipc(_engine: MockEngine) -> io::Result<(EngineEndpoint, ServerGuard)> {
    Err(io::Error::new(io::ErrorKind::Unsupported, "mock IPC server requires unix sockets"))
}

#[cfg(unix)]
mod ipc {
    use super::{MockEngine, error_object};
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::{UnixStream, unix::OwnedWriteHalf},
        sync::Mutex,
    };

    /// Reads concatenated JSON-RPC requests and answers each one as soon as it is handled, so
    /// that a stalled request does not block the others on the same connection.
    pub(super) async fn serve_connection(stream: UnixStream, engine: MockEngine) {
        let (mut reader, writer) = stream.into_split();
        let writer = Arc::new(Mutex::new(writer));
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];

        loop {
            let n = match reader.read(&mut chunk).await {
                Ok(0) | Err(_) => return,
                Ok(n) => n,
            };
            buf.extend_from_slice(&chunk[..n]);

            let consumed = {
                let mut requests = serde_json::Deserializer::from_slice(&buf).into_iter::<Value>();
                let mut consumed = 0;
                while let Some(Ok(request)) = requests.next() {
                    consumed = requests.byte_offset();
                    tokio::spawn(respond(request, engine.clone(), Arc::clone(&writer)));
                }
                consumed
            };
            buf.drain(..consumed);
        }
    }

    async fn respond(request: Value, engine: MockEngine, writer: Arc<Mutex<OwnedWriteHalf>>) {
        let id = request.get("id").cloned().unwrap_or(Value::Null);
        let method = request.get("method").and_then(Value::as_str).unwrap_or_default();
        let params = request.get("params").and_then(Value::as_array).cloned().unwrap_or_default();

        let response = match engine.handle(method, params).await {
            Ok(result) => json!({ "jsonrpc": "2.0", "id": id, "result": result }),
            Err(err) => json!({ "jsonrpc": "2.0", "id": id, "error": error_object(err) }),
        };

        let mut bytes = response.to_string().into_bytes();
        bytes.push(b'\n');
        let _ = writer.lock().await.write_all(&bytes).await;
    }
}
