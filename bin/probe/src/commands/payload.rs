//! Payload subcommand.

use clap::Parser;
use helm_engine_client::{CallContext, EngineApi, PayloadId};

/// The `payload` subcommand.
///
/// # Usage
///
/// ```sh
/// helm-probe payload 0x0100000000000000
/// ```
#[derive(Parser, Debug, Clone)]
#[command(about = "Prints a payload built after a fork choice update")]
pub struct PayloadCommand {
    /// The 8-byte payload id, hex encoded.
    pub id: PayloadId,
}

impl PayloadCommand {
    /// Fetches the payload as pretty JSON.
    pub async fn execute(&self, api: &impl EngineApi, ctx: &CallContext) -> anyhow::Result<String> {
        let payload = api.get_payload_v1(ctx, self.id).await?;
        Ok(serde_json::to_string_pretty(&payload)?)
    }
}
