//! Logging arguments and tracing subscriber setup.

use crate::CliResult;
use clap::{ArgAction, Args};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Logging arguments shared by every binary.
#[derive(Debug, Clone, Default, Args)]
pub struct LogArgs {
    /// Verbosity level (0-4). Repeat the flag to log more: `-v` is WARN, `-vvvv` is TRACE.
    #[arg(long = "verbosity", short = 'v', action = ArgAction::Count, global = true)]
    pub v: u8,
}

impl LogArgs {
    /// Installs the global tracing subscriber at the requested verbosity.
    pub fn init_tracing_subscriber(&self, filter: Option<EnvFilter>) -> CliResult<()> {
        init_tracing_subscriber(self.v, filter)
    }
}

/// Maps a `-v` count to the default log level.
pub const fn verbosity_level(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::ERROR,
        1 => LevelFilter::WARN,
        2 => LevelFilter::INFO,
        3 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Installs a `fmt` subscriber writing to stderr.
///
/// Without an explicit `filter`, directives come from `RUST_LOG` and anything it leaves unset
/// defaults to the level derived from `verbosity`.
pub fn init_tracing_subscriber(
    verbosity: u8,
    filter: Option<impl Into<EnvFilter>>,
) -> CliResult<()> {
    let filter = match filter {
        Some(filter) => filter.into(),
        None => EnvFilter::builder()
            .with_default_directive(verbosity_level(verbosity).into())
            .from_env_lossy(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(flatten)]
        log: LogArgs,
    }

    #[test]
    fn test_verbosity_count() {
        assert_eq!(TestCli::try_parse_from(["test"]).unwrap().log.v, 0);
        assert_eq!(TestCli::try_parse_from(["test", "-vvv"]).unwrap().log.v, 3);
        assert_eq!(TestCli::try_parse_from(["test", "-v", "--verbosity"]).unwrap().log.v, 2);
    }

    #[test]
    fn test_verbosity_level() {
        assert_eq!(verbosity_level(0), LevelFilter::ERROR);
        assert_eq!(verbosity_level(2), LevelFilter::INFO);
        assert_eq!(verbosity_level(4), LevelFilter::TRACE);
        assert_eq!(verbosity_level(u8::MAX), LevelFilter::TRACE);
    }

    #[test]
    fn test_second_init_fails() {
        let _ = init_tracing_subscriber(0, None::<EnvFilter>);
        assert!(init_tracing_subscriber(0, None::<EnvFilter>).is_err());
    }
}
