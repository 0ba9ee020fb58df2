//! Contains the probe CLI.

use crate::{commands::Commands, flags::GlobalArgs};
use anyhow::Result;
use clap::Parser;
use helm_cli::cli_styles;
use helm_engine_client::{CallContext, EngineClient, describe_engine_client_metrics};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Queries an execution node through the Engine API.
#[derive(Parser, Clone, Debug)]
#[command(author, version, about, styles = cli_styles(), long_about = None)]
pub struct Cli {
    /// The subcommand to run.
    #[command(subcommand)]
    pub subcommand: Commands,
    /// Global arguments for the CLI.
    #[command(flatten)]
    pub global: GlobalArgs,
}

impl Cli {
    /// Runs the CLI.
    pub fn run(self) -> Result<()> {
        self.global.log_args.init_tracing_subscriber(None)?;
        describe_engine_client_metrics();

        let rt = Self::tokio_runtime()?;
        rt.block_on(self.run_until_ctrl_c())
    }

    /// Creates a new default tokio multi-thread [Runtime](tokio::runtime::Runtime) with all
    /// features enabled
    pub fn tokio_runtime() -> Result<tokio::runtime::Runtime, std::io::Error> {
        tokio::runtime::Builder::new_multi_thread().enable_all().build()
    }

    /// Runs the subcommand, cancelling the call in flight on ctrl-c.
    async fn run_until_ctrl_c(self) -> Result<()> {
        let cancel = CancellationToken::new();
        let on_ctrl_c = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!(target: "probe", "Received ctrl-c, cancelling");
                on_ctrl_c.cancel();
            }
        });

        let config = self.global.engine.config();
        info!(target: "probe", endpoint = %config.endpoint, "Connecting to execution node");
        let client = EngineClient::connect(&config).await?;

        let ctx = CallContext::with_cancellation(cancel);
        let ctx = match config.timeout() {
            Some(timeout) => ctx.timeout(timeout),
            None => ctx,
        };

        let out = self.subcommand.execute(&client, &ctx).await?;
        println!("{out}");
        Ok(())
    }
}
