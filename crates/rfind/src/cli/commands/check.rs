//! Implementation of `rfind check`.

use std::{collections::BTreeSet, process::ExitCode};

use rfind_config::{Config, ConfigWarning, discover_config_files, is_global_config};
use rfind_highlight::{success, warning};

use crate::cli::{context::CommandContext, output::dim};

/// Validates configuration and prints warnings with hints.
///
/// Exits with failure when a file cannot be loaded or when any warning is reported.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let files = discover_config_files(&ctx.cwd);
    if files.is_empty() {
        println!("No configuration files found; defaults apply.");
        println!("{}", dim("Run 'rfind init' to create one."));
        return ExitCode::SUCCESS;
    }

    println!("Checking {} config file(s):", files.len());
    for path in &files {
        let scope = if is_global_config(path) { "global" } else { "local" };
        println!("  {} {}", path.display(), dim(&format!("({scope})")));
    }
    println!();

    let config = match Config::load_from_files(&files) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let warnings = config.validate();
    if warnings.is_empty() {
        println!("{}", success("No issues found."));
        return ExitCode::SUCCESS;
    }

    println!("{}", warning(&format!("Warnings ({}):", warnings.len())));
    for w in &warnings {
        println!("  - {w}");
    }
    println!();
    print_hints(&warnings);
    ExitCode::FAILURE
}

/// Prints each distinct hint once, in a stable order.
fn print_hints(warnings: &[ConfigWarning]) {
    let hints: BTreeSet<&str> = warnings.iter().map(ConfigWarning::hint).collect();
    println!("Hints:");
    for hint in hints {
        println!("  - {hint}");
    }
}
