//! Command implementations and dispatch.

pub mod check;
pub mod classify;
pub mod config;
pub mod init;
pub mod interactive;
pub mod search;

use std::process::ExitCode;

use super::{args::Commands, context::CommandContext};

/// Dispatches to the selected subcommand.
pub fn run(command: &Commands, ctx: &CommandContext) -> ExitCode {
    match command {
        Commands::Search(cmd) => search::run(ctx, cmd),
        Commands::Classify(cmd) => classify::run(ctx, &cmd.query, cmd.json),
        Commands::Interactive(cmd) => interactive::run(ctx, cmd),
        Commands::Init(cmd) => init::run(ctx, cmd),
        Commands::Config => config::run(ctx),
        Commands::Check => check::run(ctx),
    }
}
