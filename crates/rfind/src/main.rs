//! rfind: find text in HTML documents.
//!
//! Queries are literal text, glob-like wildcards, or regular expressions. Matches are
//! highlighted in place, stepped through one at a time, and removed again without a trace.

use std::process::ExitCode;

use clap::Parser;

mod cli;

use cli::{
    CommandContext,
    args::{Cli, Commands},
    commands, init_logging,
};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // init and check must work when an existing config file is invalid
    let ctx = match cli.command {
        Commands::Init(_) | Commands::Check => CommandContext::load_cwd_only(),
        _ => CommandContext::load(),
    };
    let ctx = match ctx {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    commands::run(&cli.command, &ctx)
}
