//! Block lookup subcommands.

use alloy_primitives::B256;
use clap::Parser;
use helm_engine_client::{CallContext, EngineApi};

/// The `latest-block` subcommand.
///
/// # Usage
///
/// ```sh
/// helm-probe latest-block
/// ```
#[derive(Parser, Debug, Clone)]
#[command(about = "Prints the latest execution block")]
pub struct LatestBlockCommand {}

impl LatestBlockCommand {
    /// Fetches the latest block as pretty JSON.
    pub async fn execute(&self, api: &impl EngineApi, ctx: &CallContext) -> anyhow::Result<String> {
        let block = api
            .latest_execution_block(ctx)
            .await?
            .ok_or_else(|| anyhow::anyhow!("execution node returned no latest block"))?;
        Ok(serde_json::to_string_pretty(&block)?)
    }
}

/// The `block` subcommand.
///
/// # Usage
///
/// ```sh
/// helm-probe block <HASH>
/// ```
#[derive(Parser, Debug, Clone)]
#[command(about = "Prints the execution block with the given hash")]
pub struct BlockCommand {
    /// Hash of the block.
    pub hash: B256,
}

impl BlockCommand {
    /// Fetches the block as pretty JSON.
    pub async fn execute(&self, api: &impl EngineApi, ctx: &CallContext) -> anyhow::Result<String> {
        let Some(block) = api.execution_block_by_hash(ctx, self.hash).await? else {
            anyhow::bail!("block {} not found", self.hash);
        };
        Ok(serde_json::to_string_pretty(&block)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use helm_engine_client::{
        BLOCK_BY_HASH, EngineClient,
        test_utils::{MockEngine, MockReply, fixtures},
    };
    use serde_json::{Value, json};

    #[tokio::test]
    async fn test_latest_block_prints_json() {
        let client = EngineClient::new(MockEngine::new());
        let out =
            LatestBlockCommand {}.execute(&client, &CallContext::background()).await.unwrap();
        let printed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(printed, json!(fixtures::execution_block()));
    }

    #[tokio::test]
    async fn test_block_not_found() {
        let engine = MockEngine::new();
        engine.set_reply(BLOCK_BY_HASH, MockReply::Result(Value::Null)).await;
        let client = EngineClient::new(engine);

        let cmd = BlockCommand { hash: fixtures::hash("missing") };
        let err = cmd.execute(&client, &CallContext::background()).await.unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}
