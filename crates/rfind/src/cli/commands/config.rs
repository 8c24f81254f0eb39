//! Implementation of `rfind config`.

use std::process::ExitCode;

use rfind_config::is_global_config;
use rfind_highlight::{Highlighter, rule};

use crate::cli::{
    context::CommandContext,
    output::{dim, subheader},
};

/// Shows discovered configuration files and the effective settings.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config = &ctx.config;

    println!("{}", subheader("Config files (highest precedence first):"));
    if config.sources.is_empty() {
        println!("  {}", dim("(none found, using defaults)"));
    } else {
        for path in &config.sources {
            let scope = if is_global_config(path) { "global" } else { "local" };
            println!("  {} {}", path.display(), dim(&format!("({scope})")));
        }
    }
    println!();

    let settings = match config.settings_to_toml() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!("{}", subheader("Effective settings:"));
    println!("{}", rule(40));
    print!("{}", Highlighter::new().highlight_toml(&settings));
    println!("{}", rule(40));
    ExitCode::SUCCESS
}
