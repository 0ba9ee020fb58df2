#![doc = include_str!("../README.md")]

pub mod cli;
pub mod commands;
pub mod flags;

use clap::Parser;

fn main() {
    helm_cli::backtrace::enable();

    if let Err(err) = cli::Cli::parse().run() {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}
