//! Clap argument definitions for the `rfind` CLI.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "rfind")]
#[command(about = "Find text in HTML documents with literals, wildcards or regular expressions")]
pub struct Cli {
    /// Log verbosity (-v for debug, -vv for trace); RFIND_LOG overrides
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Shared output mode flags.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Output in JSON format
    #[arg(long, conflicts_with_all = ["markup", "list"])]
    pub json: bool,

    /// Output the highlighted document as markup
    #[arg(long, conflicts_with = "list")]
    pub markup: bool,

    /// Output a table of matches instead of the document
    #[arg(long)]
    pub list: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

/// Arguments for `rfind search`.
#[derive(Args, Debug, Clone)]
pub struct SearchCommand {
    /// HTML file to search
    pub file: PathBuf,

    /// Query: literal text, a wildcard pattern, or a regular expression
    pub query: String,

    /// Move to the next match N times after searching
    #[arg(short = 'n', long, default_value = "0", value_name = "N")]
    pub next: usize,

    /// Move to the previous match N times after searching
    #[arg(short = 'p', long, default_value = "0", value_name = "N")]
    pub previous: usize,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: OutputArgs,
}

/// Arguments for `rfind classify`.
#[derive(Args, Debug, Clone)]
pub struct ClassifyCommand {
    /// Query to explain
    pub query: String,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `rfind interactive`.
#[derive(Args, Debug, Clone)]
pub struct InteractiveCommand {
    /// HTML file to search
    pub file: PathBuf,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

/// Arguments for `rfind init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.rfind.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `rfind` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Search a document and show highlighted matches
    #[command(after_help = "\
QUERY MODES:
  TODO              Literal: matches the text itself
  test*  f?x        Wildcard: * any run, ? one character, never across lines
  \\d{3}  (a|b)      Regex: any query containing \\ ^ $ { } ( ) | [ ]

All modes ignore case and find every non-overlapping match.

EXAMPLES:
  rfind search page.html todo
  rfind search page.html 'price*'
  rfind search page.html '\\$\\d+\\.\\d{2}' --list
  rfind search page.html '(TODO|FIXME):' --next 2")]
    Search(SearchCommand),

    /// Explain how a query is interpreted
    Classify(ClassifyCommand),

    /// Search a document interactively from standard input
    #[command(after_help = "\
COMMANDS:
  <text>    Search for <text> (an empty line clears)
  :n        Next match
  :p        Previous match
  :show     Print the highlighted document
  :open     Open the find tool
  :close    Close the find tool and restore the document
  :q        Quit")]
    Interactive(InteractiveCommand),

    /// Initialize rfind configuration in current directory
    Init(InitCommand),

    /// Show discovered configuration files and effective settings
    Config,

    /// Validate configuration and diagnose issues
    Check,
}
