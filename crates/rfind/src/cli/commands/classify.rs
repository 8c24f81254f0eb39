//! Implementation of `rfind classify`.

use std::process::ExitCode;

use rfind_pattern::{MatchMode, classify, compile_with, translate};
use serde::Serialize;

use crate::cli::{
    context::CommandContext,
    output::{dim, print_json, subheader},
};

/// JSON output for `rfind classify`.
#[derive(Serialize)]
struct JsonClassifyOutput {
    /// The raw query.
    query: String,
    /// Interpretation, absent for an empty query.
    mode: Option<&'static str>,
    /// The pattern handed to the engine.
    pattern: Option<String>,
    /// Whether the pattern compiled.
    valid: bool,
    /// Compile error, if any.
    error: Option<String>,
    /// Hint for a common mistake, if one applies.
    suggestion: Option<&'static str>,
}

/// Returns a one-line description of a match mode.
fn describe(mode: MatchMode) -> &'static str {
    match mode {
        MatchMode::Literal => "matches the text itself",
        MatchMode::Wildcard => "* matches any run and ? one character, within a line",
        MatchMode::Regex => "used as a regular expression",
    }
}

/// Explains how a query will be interpreted, compiling it with the configured engine limits.
pub fn run(ctx: &CommandContext, query: &str, json: bool) -> ExitCode {
    let engine = ctx.find_options().engine();
    let result = compile_with(query, &engine);
    let output = match &result {
        Ok(None) => JsonClassifyOutput {
            query: query.to_string(),
            mode: None,
            pattern: None,
            valid: true,
            error: None,
            suggestion: None,
        },
        Ok(Some(pattern)) => JsonClassifyOutput {
            query: query.to_string(),
            mode: Some(pattern.mode().as_str()),
            pattern: Some(pattern.source().to_string()),
            valid: true,
            error: None,
            suggestion: None,
        },
        Err(e) => JsonClassifyOutput {
            query: query.to_string(),
            mode: Some(classify(query).as_str()),
            pattern: Some(translate(query, classify(query))),
            valid: false,
            error: Some(e.message().to_string()),
            suggestion: e.suggestion(),
        },
    };
    let code = if output.valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    };

    if json {
        let printed = print_json(&output);
        return if output.valid { printed } else { code };
    }

    match &result {
        Ok(None) => println!("{}", dim("(empty query: nothing is searched)")),
        Ok(Some(pattern)) => {
            println!("{} {}", subheader("Mode:"), pattern.mode());
            println!("   {}", describe(pattern.mode()));
            println!("{} {}", subheader("Pattern:"), pattern.source());
            println!("{}", dim("case-insensitive, all matches"));
        }
        Err(e) => {
            println!("{} {}", subheader("Mode:"), classify(query));
            eprintln!("error: {e}");
            if let Some(hint) = e.suggestion() {
                eprintln!("hint: {hint}");
            }
        }
    }
    code
}
