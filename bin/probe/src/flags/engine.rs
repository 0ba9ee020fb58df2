//! Engine connection flags.

use helm_engine_client::{
    DEFAULT_ENGINE_RPC, DEFAULT_ENGINE_TIMEOUT_SECS, EngineClientConfig, EngineEndpoint,
};

/// Engine connection arguments.
#[derive(Clone, Debug, clap::Args)]
pub struct EngineArgs {
    /// Engine API endpoint: an http(s) URL or the path of an IPC socket.
    #[arg(
        long = "engine.rpc",
        global = true,
        env = "HELM_ENGINE_RPC",
        default_value = DEFAULT_ENGINE_RPC
    )]
    pub engine_rpc: EngineEndpoint,
    /// Timeout for each engine call, in seconds. `0` disables it.
    #[arg(
        long = "engine.timeout",
        global = true,
        env = "HELM_ENGINE_TIMEOUT",
        default_value_t = DEFAULT_ENGINE_TIMEOUT_SECS
    )]
    pub engine_timeout: u64,
}

impl Default for EngineArgs {
    fn default() -> Self {
        let config = EngineClientConfig::default();
        Self { engine_rpc: config.endpoint, engine_timeout: config.timeout_secs }
    }
}

impl EngineArgs {
    /// Returns the client configuration described by the flags.
    pub fn config(&self) -> EngineClientConfig {
        EngineClientConfig { endpoint: self.engine_rpc.clone(), timeout_secs: self.engine_timeout }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::time::Duration;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(flatten)]
        engine: EngineArgs,
    }

    #[test]
    fn test_engine_args_default() {
        let cli = TestCli::try_parse_from(["test"]).unwrap();
        assert_eq!(cli.engine.config(), EngineClientConfig::default());
    }

    #[test]
    fn test_engine_args_ipc() {
        let cli = TestCli::try_parse_from([
            "test",
            "--engine.rpc",
            "/run/geth.ipc",
            "--engine.timeout",
            "5",
        ])
        .unwrap();
        let config = cli.engine.config();
        assert_eq!(config.endpoint, EngineEndpoint::Ipc("/run/geth.ipc".into()));
        assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_engine_args_rejects_unsupported_scheme() {
        assert!(TestCli::try_parse_from(["test", "--engine.rpc", "ws://localhost:8546"]).is_err());
    }
}
