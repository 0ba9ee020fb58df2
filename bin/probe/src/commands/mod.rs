//! Subcommands of the probe.

use clap::Subcommand;
use helm_engine_client::{CallContext, EngineApi};

mod block;
pub use block::{BlockCommand, LatestBlockCommand};

mod payload;
pub use payload::PayloadCommand;

/// Probe subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Prints the latest execution block.
    LatestBlock(LatestBlockCommand),
    /// Prints the execution block with the given hash.
    Block(BlockCommand),
    /// Prints a payload built after a fork choice update.
    Payload(PayloadCommand),
}

impl Commands {
    /// Runs the subcommand and returns its output.
    pub async fn execute(&self, api: &impl EngineApi, ctx: &CallContext) -> anyhow::Result<String> {
        match self {
            Self::LatestBlock(cmd) => cmd.execute(api, ctx).await,
            Self::Block(cmd) => cmd.execute(api, ctx).await,
            Self::Payload(cmd) => cmd.execute(api, ctx).await,
        }
    }
}
