//! Implementation of `rfind search`.

use std::process::ExitCode;

use rfind_engine::FindSession;
use tracing::debug;

use crate::cli::{
    args::SearchCommand,
    context::CommandContext,
    output::{
        JsonSearchOutput, mark_style, print_document, print_json, print_markup,
        print_match_table, report_failure, status_line, use_color,
    },
};

/// Searches a document once and prints the highlighted result.
pub fn run(ctx: &CommandContext, cmd: &SearchCommand) -> ExitCode {
    let options = ctx.find_options();
    let mut doc = match ctx.open_document(&cmd.file, &options) {
        Ok(doc) => doc,
        Err(code) => return code,
    };

    let mut session = FindSession::new(options);
    session.open();
    session.query_changed(&mut doc, &cmd.query);
    for _ in 0..cmd.next {
        session.next(&mut doc);
    }
    for _ in 0..cmd.previous {
        session.previous(&mut doc);
    }
    debug!(status = %session.status(), "search finished");

    let output = &cmd.output;
    if output.json {
        let code = print_json(&JsonSearchOutput::from_session(&doc, &session));
        return if session.status().is_failed() {
            ExitCode::FAILURE
        } else {
            code
        };
    }

    let status = session.status();
    if let Some(failure) = status.failure() {
        println!("{}", status_line(status, use_color(output.no_color)));
        report_failure(failure);
        return ExitCode::FAILURE;
    }

    let color = use_color(output.no_color);
    if output.markup {
        print_markup(&doc, color);
        return ExitCode::SUCCESS;
    }

    println!("{}", status_line(status, color));
    if output.list {
        if status.count() > 0 {
            print_match_table(&doc, &session);
        }
    } else {
        println!();
        print_document(&doc, &mark_style(&session, color));
    }
    ExitCode::SUCCESS
}
