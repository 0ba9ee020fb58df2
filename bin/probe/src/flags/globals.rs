//! Global arguments for the CLI.

use super::EngineArgs;
use clap::Parser;
use helm_cli::LogArgs;

/// Global arguments for the CLI.
#[derive(Parser, Default, Clone, Debug)]
pub struct GlobalArgs {
    /// Logging arguments.
    #[command(flatten)]
    pub log_args: LogArgs,
    /// Engine connection arguments.
    #[command(flatten)]
    pub engine: EngineArgs,
}
